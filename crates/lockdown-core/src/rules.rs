//! Rule evaluation: classifies a window title into one action.

use std::collections::HashSet;
use std::fmt;

use crate::config::{DetectionLevel, RuleSet};
use crate::window::{ProcessId, ProcessSnapshot};

/// Exact title added to the Ordinary rules from detection level 2.
pub const TASK_MANAGER_TITLE: &str = "Task Manager";
/// Title substring added to the Include rules from detection level 2.
pub const COMMAND_PROMPT_PATTERN: &str = "cmd.exe";

/// The rule list a title matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Ordinary,
    Force,
    Include,
    ExInclude,
}

impl RuleKind {
    /// Whether an ignored close request escalates to termination.
    pub fn escalates(self) -> bool {
        matches!(self, Self::Force | Self::ExInclude)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ordinary => "Ordinary",
            Self::Force => "Force",
            Self::Include => "Include",
            Self::ExInclude => "ExInclude",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule hit: which list matched and, for substring lists, which
/// pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub kind: RuleKind,
    pub pattern: Option<String>,
}

/// What to do with the foreground window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Protected title: record the visit, never act.
    Observe,
    /// Request a close once, no escalation.
    CloseOnce(RuleMatch),
    /// Request a close and terminate the owner if it is ignored.
    CloseAndEscalate(RuleMatch),
    /// No rule matched.
    Record,
}

/// Classifies `title`. The first matching list wins, in the order
/// Protect-by-title, Ordinary, Force, Include, ExInclude.
pub fn classify(title: &str, rules: &RuleSet) -> Action {
    if contains_exact(&rules.protect.by_title, title) {
        return Action::Observe;
    }
    if contains_exact(&rules.ordinary, title) {
        return Action::CloseOnce(exact(RuleKind::Ordinary));
    }
    if contains_exact(&rules.force, title) {
        return Action::CloseAndEscalate(exact(RuleKind::Force));
    }
    if let Some(pattern) = first_substring(&rules.include, title) {
        return Action::CloseOnce(substring(RuleKind::Include, pattern));
    }
    if let Some(pattern) = first_substring(&rules.ex_include, title) {
        return Action::CloseAndEscalate(substring(RuleKind::ExInclude, pattern));
    }
    Action::Record
}

fn contains_exact(list: &[String], title: &str) -> bool {
    list.iter().any(|entry| entry == title)
}

fn first_substring<'a>(list: &'a [String], title: &str) -> Option<&'a str> {
    list.iter()
        .map(String::as_str)
        .find(|pattern| title.contains(pattern))
}

fn exact(kind: RuleKind) -> RuleMatch {
    RuleMatch {
        kind,
        pattern: None,
    }
}

fn substring(kind: RuleKind, pattern: &str) -> RuleMatch {
    RuleMatch {
        kind,
        pattern: Some(pattern.to_string()),
    }
}

/// Layers the built-in rules for `level` on top of the file rules.
pub fn apply_detection_level(rules: &mut RuleSet, level: DetectionLevel) {
    if level.get() >= 2 {
        rules.ordinary.push(TASK_MANAGER_TITLE.to_string());
        rules.include.push(COMMAND_PROMPT_PATTERN.to_string());
    }
    // Level 3 has no extra rules yet.
}

/// Resolves Protect-by-process names to the pids running in `snapshot`.
///
/// Executable names compare ASCII case-insensitively, matching how
/// Windows treats file names.
pub fn protected_pids(snapshot: &ProcessSnapshot, rules: &RuleSet) -> HashSet<ProcessId> {
    snapshot
        .iter()
        .filter(|(_, name)| {
            rules
                .protect
                .by_process
                .iter()
                .any(|protected| protected.eq_ignore_ascii_case(name))
        })
        .map(|(pid, _)| *pid)
        .collect()
}

/// The read-only rule data the monitor runs with.
///
/// Built once at start-up: the detection level is applied and the
/// Protect process names are resolved against a single process
/// snapshot. Neither is re-evaluated while monitoring.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    rules: RuleSet,
    protected: HashSet<ProcessId>,
}

impl Policy {
    pub fn new(mut rules: RuleSet, level: DetectionLevel, snapshot: &ProcessSnapshot) -> Self {
        apply_detection_level(&mut rules, level);
        let protected = protected_pids(snapshot, &rules);
        Self { rules, protected }
    }

    pub fn classify(&self, title: &str) -> Action {
        classify(title, &self.rules)
    }

    pub fn is_protected(&self, pid: ProcessId) -> bool {
        self.protected.contains(&pid)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn protected(&self) -> &HashSet<ProcessId> {
        &self.protected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProtectRules;

    fn rules() -> RuleSet {
        RuleSet {
            protect: ProtectRules {
                by_process: vec!["explorer.exe".into()],
                by_title: vec!["Homework".into(), "Game".into()],
            },
            ordinary: vec!["Notepad".into()],
            force: vec!["Game".into(), "Arcade".into()],
            include: vec!["Solitaire".into(), "Game".into()],
            ex_include: vec!["Minecraft".into()],
        }
    }

    #[test]
    fn protected_title_wins_over_every_other_list() {
        // Arrange
        let mut rules = rules();
        rules.ordinary.push("Homework".into());
        rules.ex_include.push("Home".into());

        // Act / Assert
        assert_eq!(classify("Homework", &rules), Action::Observe);
        assert_eq!(classify("Game", &rules), Action::Observe);
    }

    #[test]
    fn exact_lists_match_whole_titles_only() {
        let rules = rules();

        assert_eq!(
            classify("Notepad", &rules),
            Action::CloseOnce(exact(RuleKind::Ordinary))
        );
        assert_eq!(
            classify("Arcade", &rules),
            Action::CloseAndEscalate(exact(RuleKind::Force))
        );
        assert_eq!(classify("Notepad++", &rules), Action::Record);
    }

    #[test]
    fn ordinary_wins_over_force() {
        let mut rules = rules();
        rules.force.push("Notepad".into());

        assert_eq!(
            classify("Notepad", &rules),
            Action::CloseOnce(exact(RuleKind::Ordinary))
        );
    }

    #[test]
    fn substring_lists_are_tagged_with_the_matching_pattern() {
        let rules = rules();

        assert_eq!(
            classify("Microsoft Solitaire Collection", &rules),
            Action::CloseOnce(substring(RuleKind::Include, "Solitaire"))
        );
        assert_eq!(
            classify("Minecraft 1.20", &rules),
            Action::CloseAndEscalate(substring(RuleKind::ExInclude, "Minecraft"))
        );
    }

    #[test]
    fn include_wins_over_ex_include() {
        let mut rules = rules();
        rules.ex_include.push("Solitaire".into());

        assert_eq!(
            classify("Solitaire", &rules),
            Action::CloseOnce(substring(RuleKind::Include, "Solitaire"))
        );
    }

    #[test]
    fn unmatched_titles_are_recorded() {
        let rules = rules();

        for title in ["Inbox - Outlook", "notepad", "Calculator"] {
            assert_eq!(classify(title, &rules), Action::Record, "{title}");
        }
        assert_eq!(classify("anything", &RuleSet::default()), Action::Record);
    }

    #[test]
    fn level_one_adds_nothing() {
        let mut rules = RuleSet::default();

        apply_detection_level(&mut rules, DetectionLevel::new(1));

        assert_eq!(rules, RuleSet::default());
    }

    #[test]
    fn level_two_and_three_add_task_manager_and_command_prompt() {
        for level in [2, 3] {
            // Arrange
            let mut rules = RuleSet::default();

            // Act
            apply_detection_level(&mut rules, DetectionLevel::new(level));

            // Assert
            assert_eq!(rules.ordinary, vec![TASK_MANAGER_TITLE]);
            assert_eq!(rules.include, vec![COMMAND_PROMPT_PATTERN]);
            assert_eq!(
                classify(r"C:\Windows\system32\cmd.exe", &rules),
                Action::CloseOnce(substring(RuleKind::Include, COMMAND_PROMPT_PATTERN))
            );
        }
    }

    #[test]
    fn protected_pids_resolve_from_snapshot() {
        // Arrange
        let snapshot = ProcessSnapshot::from([
            (ProcessId(10), "Explorer.EXE".to_string()),
            (ProcessId(11), "explorer.exe".to_string()),
            (ProcessId(20), "game.exe".to_string()),
        ]);

        // Act
        let pids = protected_pids(&snapshot, &rules());

        // Assert
        assert_eq!(pids, HashSet::from([ProcessId(10), ProcessId(11)]));
    }

    #[test]
    fn empty_snapshot_protects_nothing() {
        let policy = Policy::new(rules(), DetectionLevel::new(1), &ProcessSnapshot::new());

        assert!(policy.protected().is_empty());
    }

    #[test]
    fn policy_applies_level_before_classifying() {
        let policy = Policy::new(
            RuleSet::default(),
            DetectionLevel::new(2),
            &ProcessSnapshot::new(),
        );

        assert_eq!(
            policy.classify(TASK_MANAGER_TITLE),
            Action::CloseOnce(exact(RuleKind::Ordinary))
        );
    }
}
