pub mod company;
pub mod dispatch;
pub mod find_lines;
pub mod openapi;
pub mod probes;
pub mod register;
pub mod schema;
pub mod verify;
