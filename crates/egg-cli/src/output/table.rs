//! Plain aligned tables for `--format table`.

/// Render `rows` under `headers`, columns padded to their widest cell and
/// separated by two spaces. Cells longer than `max_cell` are cut with `…`.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], max_cell: usize) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count().min(max_cell))
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_line = line(headers.iter().map(ToString::to_string).collect());
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let cells = (0..headers.len())
            .map(|index| {
                row.get(index)
                    .map_or_else(|| "-".to_string(), |cell| truncate(cell, max_cell))
            })
            .collect();
        lines.push(line(cells));
    }
    lines.join("\n")
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{value}{}", " ".repeat(width.saturating_sub(len)))
}

fn truncate(value: &str, width: usize) -> String {
    // Cells are single-line.
    let value = value.replace('\n', " ");
    if value.chars().count() <= width {
        return value;
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
