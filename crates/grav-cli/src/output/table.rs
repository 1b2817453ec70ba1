#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const GAP: &str = "  ";
const MIN_WIDTH: usize = 4;

/// Render an aligned plain-text table.
///
/// Columns shrink widest-first until the table fits `max_width`; cells that
/// no longer fit are cut with an ellipsis. The last column is never padded.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    if let Some(max_width) = options.max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let header_line = format_row(headers.iter().copied(), &widths, false);
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let cells = (0..widths.len()).map(|index| row.get(index).map_or("-", String::as_str));
        lines.push(format_row(cells, &widths, options.color));
    }
    lines.join("\n")
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize], color: bool) -> String {
    let last = widths.len().saturating_sub(1);
    let mut line = String::new();
    for (index, (cell, width)) in cells.zip(widths).enumerate() {
        if index > 0 {
            line.push_str(GAP);
        }
        let text = truncate(cell, *width);
        let pad = width.saturating_sub(text.chars().count());
        if color {
            line.push_str(&colorize(&text));
        } else {
            line.push_str(&text);
        }
        if index < last {
            line.push_str(&" ".repeat(pad));
        }
    }
    line.trim_end().to_string()
}

fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let gaps = widths.len().saturating_sub(1) * GAP.len();
    loop {
        let total: usize = widths.iter().sum::<usize>() + gaps;
        if total <= max_width {
            return;
        }
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].len().max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = candidate else {
            return;
        };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn colorize(value: &str) -> String {
    let code = match value.trim().to_ascii_lowercase().as_str() {
        "pass" | "passed" | "ok" | "true" | "created" => "32",
        "warn" | "warning" | "exists" | "skipped" => "33",
        "fail" | "failed" | "false" | "missing" | "error" => "31",
        "info" => "36",
        _ => return value.to_string(),
    };
    format!("\u{1b}[{code}m{value}\u{1b}[0m")
}
