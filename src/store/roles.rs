use std::collections::BTreeMap;

/// Renders the role listing as a boxed two-column table, sorted by role id.
///
/// ```text
/// +------+------------+
/// |   id |       role |
/// +======+============+
/// |    3 |    Manager |
/// +------+------------+
/// ```
pub fn render_roles_table(roles: &BTreeMap<i64, String>) -> String {
    let max_name_len = roles.values().map(String::len).max().unwrap_or(0);
    let widths = [6, max_name_len + 2];

    let mut table = String::new();
    table.push_str(&separator_line(&widths, '-'));
    table.push_str(&table_row(&widths, &["id", "role"]));
    table.push_str(&separator_line(&widths, '='));

    for (id, name) in roles {
        table.push_str(&table_row(&widths, &[&id.to_string(), name]));
    }

    table.push_str(&separator_line(&widths, '-'));
    table
}

fn separator_line(widths: &[usize], style: char) -> String {
    let mut line = String::from("+");
    for &width in widths {
        for _ in 0..width {
            line.push(style);
        }
        line.push('+');
    }
    line.push('\n');
    line
}

fn table_row(widths: &[usize], labels: &[&str]) -> String {
    let mut row = String::from("|");
    for (&width, label) in widths.iter().zip(labels) {
        row.push_str(&format!("{label:>pad$} |", pad = width - 1));
    }
    row.push('\n');
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_line_shape() {
        assert_eq!(separator_line(&[3, 5], '-'), "+---+-----+\n");
    }

    #[test]
    fn rows_are_right_aligned() {
        assert_eq!(table_row(&[5, 9], &["id", "role"]), "|   id |    role |\n");
    }

    #[test]
    fn table_lists_roles_sorted_by_id() {
        let mut roles = BTreeMap::new();
        roles.insert(4, "Developer".to_string());
        roles.insert(3, "Manager".to_string());

        let table = render_roles_table(&roles);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "+------+-----------+");
        assert_eq!(lines[1], "|   id |      role |");
        assert_eq!(lines[2], "+======+===========+");
        assert!(lines[3].contains("3") && lines[3].contains("Manager"));
        assert!(lines[4].contains("4") && lines[4].contains("Developer"));
    }
}
