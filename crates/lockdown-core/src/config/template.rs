/// Generates the default rule file written on first run.
///
/// Parsing it yields the same values as [`Config::default`](super::Config)
/// plus a Protect list covering the core Windows system processes.
pub fn generate_rules() -> String {
    r#"# Lockdown rule file
#
# Config section: one `:key(value)` per line.
#   enable      true to run the monitor, anything else exits at start-up
#   password    password the control panel asks for before stopping
#   record_all  true to record every foreground title, not just matches
#   interval    poll interval in seconds (minimum 0.01)
#   level       1 = file rules only, 2 = also close Task Manager and
#               command prompts, 3 = reserved
:enable(true)
:password(123456)
:record_all(true)
:interval(0.1)
:level(1)
;;

# Rule section. Titles are matched case-sensitively.
#   [Protect]    (0)process.exe never force-terminated
#                (1)Window Title never closed
#   [Ordinary]   exact title, close request only
#   [Force]      exact title, close request, then terminate if ignored
#   [Include]    title substring, close request only
#   [ExInclude]  title substring, close request, then terminate if ignored

[Protect]{
(0)[System Process]
(0)System
(0)explorer.exe
(0)svchost.exe
(0)dwm.exe
}

[Ordinary]{
QQ
WeChat
}

[Force]{
}

[Include]{
}

[ExInclude]{
}

;;;;
"#
    .to_string()
}
