#[cfg(windows)]
pub fn execute() {
    use comfy_table::presets::UTF8_FULL;
    use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
    use lockdown_core::Desktop;

    let desktop = lockdown_windows::WinDesktop;
    let processes = desktop.enumerate_processes();
    let mut windows: Vec<_> = desktop.enumerate_windows().into_iter().collect();
    windows.sort_by_key(|(handle, _)| *handle);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("HWND"),
            Cell::new("PID").set_alignment(CellAlignment::Right),
            Cell::new("Process"),
            Cell::new("Title"),
        ]);

    for (handle, entry) in &windows {
        let process = processes.get(&entry.pid).map_or("?", String::as_str);
        table.add_row(vec![
            Cell::new(handle),
            Cell::new(entry.pid).set_alignment(CellAlignment::Right),
            Cell::new(process),
            Cell::new(&entry.title),
        ]);
    }

    println!("{table}");
    println!("\n{} windows found", windows.len());
}

#[cfg(not(windows))]
pub fn execute() {
    println!("{}", super::super::run::UNSUPPORTED_HOST);
}
