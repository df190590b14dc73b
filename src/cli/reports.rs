use comfy_table::Table;

use crate::reports::ALL_REPORTS;

pub fn run() {
    let mut table = Table::new();
    table.set_header(vec!["Key", "Title", "Filters"]);
    for kind in ALL_REPORTS {
        table.add_row(vec![
            kind.key().to_string(),
            kind.title().to_string(),
            kind.filters().join(", "),
        ]);
    }
    println!("{table}");
}
