use std::path::Path;

/// Printed when the host cannot run the monitor.
pub const UNSUPPORTED_HOST: &str = "Lockdown only runs on Windows.";

/// Runs a lockdown session.
///
/// On anything but Windows this returns immediately with status 0,
/// before touching any file.
#[cfg(not(windows))]
pub fn execute(_dir: Option<&Path>) {
    println!("{UNSUPPORTED_HOST}");
}

#[cfg(windows)]
pub fn execute(dir: Option<&Path>) {
    use std::io;

    use lockdown_core::config;
    use lockdown_core::{
        Category, ConsolePanel, Desktop, Entry, Monitor, MonitorSettings, PANEL_TITLE,
        PasswordGate, Policy, RecordLog, StopSignal, session,
    };
    use lockdown_windows::{WinDesktop, console};

    let paths = super::paths(dir);
    if let Err(e) = paths.create_dir() {
        super::fail(e);
    }

    let record = RecordLog::new(&paths.record);
    if let Err(e) = record.begin_session() {
        super::fail(e);
    }
    match config::ensure_rule_file(&paths.rules) {
        Ok(true) => record.append(&Entry::info(format!(
            "rule file ({}) restored",
            paths.rules.display()
        ))),
        Ok(false) => record.append(&Entry::info("started normally")),
        Err(e) => super::fail(e),
    }

    let (config, rules) = match config::load(&paths.rules) {
        Ok(loaded) => loaded,
        Err(e) => super::fail(e),
    };
    if !config.enable {
        record.append(&Entry::new(Category::Exit, "not enabled, exited"));
        println!("Lockdown is disabled in {}.", paths.rules.display());
        return;
    }

    let desktop = WinDesktop;
    let snapshot = desktop.enumerate_processes();
    let policy = Policy::new(rules, config.level, &snapshot);
    let monitor = Monitor::new(
        desktop,
        policy,
        MonitorSettings::from(&config),
        record.clone(),
    );

    let password = config.password.clone();
    let correct = session::run(
        monitor,
        StopSignal::new(),
        move |tx| {
            if !console::set_title(PANEL_TITLE) {
                eprintln!("Warning: could not set the console title to {PANEL_TITLE:?}");
            }
            if !console::set_close_handler(tx.clone()) {
                eprintln!("Warning: could not install the console close handler");
            }
            let gate = PasswordGate::new(password);
            let panel = ConsolePanel::new(gate, io::stdin().lock(), io::stdout());
            let _ = tx.send(panel.run());
        },
        &record,
    );
    console::release_close_handler();

    if correct {
        println!("Monitoring stopped.");
    }
}
