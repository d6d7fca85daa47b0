use std::path::Path;

use lockdown_core::config;

/// Parses the rule file and prints what the monitor would run with.
pub fn execute(dir: Option<&Path>, json: bool) {
    let paths = super::paths(dir);
    let (config, rules) = match config::load(&paths.rules) {
        Ok(loaded) => loaded,
        Err(e) => super::fail(e),
    };

    if json {
        match config::report_json(&config, &rules) {
            Ok(report) => println!("{report}"),
            Err(e) => super::fail(e),
        }
        return;
    }

    println!("Rule file   {}", paths.rules.display());
    println!("Enabled     {}", config.enable);
    println!("Record all  {}", config.record_all);
    println!("Interval    {}s", config.interval_secs);
    println!("Level       {}", config.level.get());
    println!();
    println!(
        "Protect     {} processes, {} titles",
        rules.protect.by_process.len(),
        rules.protect.by_title.len()
    );
    println!("Ordinary    {}", rules.ordinary.len());
    println!("Force       {}", rules.force.len());
    println!("Include     {}", rules.include.len());
    println!("ExInclude   {}", rules.ex_include.len());
}
