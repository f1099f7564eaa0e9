use once_cell::sync::Lazy;

/// One row of the pay table.
pub struct WinRule {
    pub id: &'static str,
    pub matches: fn(&[String]) -> bool,
    pub points: u32,
}

fn all_are(pay_line: &[String], name: &str) -> bool {
    !pay_line.is_empty() && pay_line.iter().all(|s| s == name)
}

fn contains(pay_line: &[String], name: &str) -> bool {
    pay_line.iter().any(|s| s == name)
}

/// Pay table of the three-reel machine, in declaration order.
static WIN_RULES: Lazy<Vec<WinRule>> = Lazy::new(|| {
    vec![
        WinRule {
            id: "ThreeBar",
            matches: |p| all_are(p, "threeBar"),
            points: 10,
        },
        WinRule {
            id: "ThreeSeven",
            matches: |p| all_are(p, "seven"),
            points: 50,
        },
        WinRule {
            id: "ThreeCherries",
            matches: |p| all_are(p, "cherry"),
            points: 150,
        },
        WinRule {
            id: "ThreeTwoBar",
            matches: |p| all_are(p, "twoBar"),
            points: 5,
        },
        WinRule {
            id: "ThreeOneBar",
            matches: |p| all_are(p, "oneBar"),
            points: 2,
        },
        WinRule {
            id: "CherryOrSeven",
            matches: |p| contains(p, "cherry") && contains(p, "seven"),
            points: 20,
        },
    ]
});

/// Returns the pay table rows in declaration order.
pub fn rules() -> &'static [WinRule] {
    &WIN_RULES
}

/// Finds the winning rule for a pay-line.
///
/// Every rule is checked, in order, with no short-circuit; when more than
/// one matches, the last match stands.
pub fn winning_rule<'a>(rules: &'a [WinRule], pay_line: &[String]) -> Option<&'a WinRule> {
    let mut winner = None;
    for rule in rules {
        if (rule.matches)(pay_line) {
            winner = Some(rule);
        }
    }
    winner
}

/// Scores a pay-line against the pay table; a line matching no rule is
/// worth zero points.
pub fn calculate_points(pay_line: &[String]) -> u32 {
    winning_rule(&WIN_RULES, pay_line)
        .map(|rule| rule.points)
        .unwrap_or(0)
}
