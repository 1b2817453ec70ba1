//! User registration probe.
//!
//! Registers a throwaway user, then proves it exists through independent
//! read paths: detail lookup, login, and the user listings. Role assignment
//! and profile reads are recorded but never abort the probe.

use std::cell::RefCell;

use grav_client::{Registration, UserPage};
use grav_core::{RegistrationOutcome, Step, TestIdentity, VerificationReport};

use crate::poll::{PollPolicy, poll_until};
use crate::{GravibaseApi, VerifyError};

/// Inputs for one registration probe.
#[derive(Debug, Clone)]
pub struct RegistrationPlan<'a> {
    /// Project the user is registered in.
    pub project: &'a str,
    pub identity: &'a TestIdentity,
    pub roles: &'a [String],
    pub list_limit: u32,
    pub visibility: PollPolicy,
}

/// One round of the unfiltered and the filtered listing.
#[derive(Debug, Clone, Default)]
struct ListingRound {
    in_full: bool,
    in_search: bool,
    full_total: u64,
    errors: Vec<String>,
}

impl ListingRound {
    const fn visible(&self) -> bool {
        self.in_full || self.in_search
    }
}

/// Register `plan.identity` and verify it through every read path.
///
/// Returns `Ok(true)` when the user shows up in at least one listing and
/// `Ok(false)` when it stays invisible for the whole poll window. The
/// outcome is stored in `report.registration` in both cases, and also when
/// the probe aborts.
///
/// # Errors
///
/// Returns [`VerifyError::Registration`], [`VerifyError::UserNotFound`] or
/// [`VerifyError::LoginFailed`] when the user cannot be created, looked up,
/// or logged in with.
pub async fn register_and_verify<A: GravibaseApi>(
    api: &A,
    plan: &RegistrationPlan<'_>,
    report: &mut VerificationReport,
) -> Result<bool, VerifyError> {
    let mut outcome = RegistrationOutcome {
        username: plan.identity.username.clone(),
        email: plan.identity.email.clone(),
        ..RegistrationOutcome::default()
    };
    let result = run_probe(api, plan, report, &mut outcome).await;
    report.registration = Some(outcome);
    result
}

async fn run_probe<A: GravibaseApi>(
    api: &A,
    plan: &RegistrationPlan<'_>,
    report: &mut VerificationReport,
    outcome: &mut RegistrationOutcome,
) -> Result<bool, VerifyError> {
    let username = plan.identity.username.as_str();
    let user = Some(username);

    // Step 1: registration call
    tracing::info!(username, project = plan.project, "registering test user");
    let registration = Registration::password(
        username,
        &plan.identity.email,
        &plan.identity.password,
    );
    match api.register_user(&registration).await {
        Ok(status) => report.pass(
            Step::Registration,
            user,
            format!("registration call accepted (status {status})"),
        ),
        Err(source) => {
            report.fail(Step::Registration, user, format!("registration failed: {source}"));
            return Err(VerifyError::Registration(source));
        }
    }

    // Step 2: existence via details
    match api.user_details(username).await {
        Ok(details) => {
            tracing::debug!(username, %details, "user details");
            outcome.detail_found = true;
            report.pass(Step::UserDetails, user, "user retrievable via details API");
        }
        Err(source) => {
            report.fail(
                Step::UserDetails,
                user,
                format!("user not found via details API: {source}"),
            );
            return Err(VerifyError::UserNotFound {
                username: username.to_string(),
                source,
            });
        }
    }

    match api.user_profile(username).await {
        Ok(profile) => report.info(Step::UserProfile, user, profile.to_string()),
        Err(error) => report.warn(
            Step::UserProfile,
            user,
            format!("failed to fetch user profile: {error}"),
        ),
    }

    // Step 3: roles
    for role in plan.roles {
        match api.assign_role(username, role).await {
            Ok(()) => {
                outcome.roles_assigned.push(role.clone());
                report.pass(
                    Step::RoleAssignment,
                    Some(role.as_str()),
                    format!("role assigned to {username}"),
                );
            }
            Err(error) => {
                tracing::warn!(username, role = %role, %error, "failed to assign role");
                outcome.roles_failed.push(role.clone());
                report.warn(
                    Step::RoleAssignment,
                    Some(role.as_str()),
                    format!("failed to assign role to {username}: {error}"),
                );
            }
        }
    }

    match api.user_roles(username).await {
        Ok(roles) => report.info(
            Step::UserRoles,
            user,
            format!("roles held: [{}]", roles.join(", ")),
        ),
        Err(error) => report.warn(
            Step::UserRoles,
            user,
            format!("failed to fetch roles: {error}"),
        ),
    }

    // Step 4: existence via login
    match api
        .login(plan.project, username, &plan.identity.password)
        .await
    {
        Ok(()) => {
            outcome.login_succeeded = true;
            report.pass(Step::Login, user, "login with registration password succeeded");
        }
        Err(source) => {
            report.fail(Step::Login, user, format!("newly created user cannot log in: {source}"));
            return Err(VerifyError::LoginFailed {
                username: username.to_string(),
                source,
            });
        }
    }

    // Step 5: visibility in the listings
    tracing::info!(
        username,
        delay_ms = plan.visibility.initial_delay.as_millis(),
        "waiting for user to become visible in listings"
    );
    let limit = plan.list_limit;
    let listing_errors = RefCell::new(Vec::new());
    let polled = poll_until(
        &plan.visibility,
        |attempt| {
            let listing_errors = &listing_errors;
            async move {
                tracing::debug!(attempt, "listing users");
                let round = listing_round(api, username, limit).await;
                listing_errors.borrow_mut().extend(
                    round
                        .errors
                        .iter()
                        .map(|error| format!("{error} (attempt {attempt})")),
                );
                round
            }
        },
        ListingRound::visible,
    )
    .await;

    let round = polled.value;
    outcome.visible_in_full_list = round.in_full;
    outcome.visible_in_search = round.in_search;
    outcome.visibility_attempts = polled.attempts;

    // Failed listings from every round.
    for error in listing_errors.into_inner() {
        report.warn(Step::Visibility, user, error);
    }

    if polled.satisfied {
        report.pass(
            Step::Visibility,
            user,
            format!(
                "user visible in list (full list: {}, search: {}) after {} attempt(s)",
                yes_no(round.in_full),
                yes_no(round.in_search),
                polled.attempts
            ),
        );
        Ok(true)
    } else {
        report.fail(
            Step::Visibility,
            user,
            format!(
                "user is NOT visible in any list view after {} attempt(s) ({} users in system); \
                 possible indexing delay or list filter",
                polled.attempts, round.full_total
            ),
        );
        Ok(false)
    }
}

async fn listing_round<A: GravibaseApi>(api: &A, username: &str, limit: u32) -> ListingRound {
    let mut round = ListingRound::default();

    match api.list_users(None, limit).await {
        Ok(page) => {
            log_page("full", &page);
            round.in_full = page.contains(username);
            round.full_total = page.total;
        }
        Err(error) => round.errors.push(format!("failed to fetch full user list: {error}")),
    }

    match api.list_users(Some(username), limit).await {
        Ok(page) => {
            log_page("search", &page);
            round.in_search = page.contains(username);
        }
        Err(error) => round.errors.push(format!("failed to fetch filtered user list: {error}")),
    }

    round
}

fn log_page(kind: &str, page: &UserPage) {
    tracing::debug!(
        kind,
        returned = page.data.len(),
        total = page.total,
        "user listing"
    );
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
