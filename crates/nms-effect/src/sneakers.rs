// SPDX-License-Identifier: MIT
//
// The "Federal Reserve Transfer Node" screen from Sneakers (1992), laid
// out for a given terminal width. Everything is ASCII, so byte length is
// column width.

const HEADER_LEFT: &str = "DATANET PROC RECORD:  45-3456-W-3452";
const HEADER_RIGHT: &str = "Transnet on/xc-3";
const TITLE: &str = "FEDERAL RESERVE TRANSFER NODE";
const SUBTITLE: &str = "National Headquarters";
const BANNER: &str = "************  Remote Systems Network Input Station  ************";
const RULE: &str = "================================================================";
const PROMPT: &str = "[ ] Select Option or ESC to Abort";

const MENU: [&str; 6] = [
    "[1] Interbank Funds Transfer  (Code Prog: 485-GWU)",
    "[2] International Telelink Access  (Code Lim: XRP-262)",
    "[3] Remote Facsimile Send/Receive  (Code Tran:  2LZP-517)",
    "[4] Regional Bank Interconnect  (Security Code:  47-B34)",
    "[5] Update System Parameters  (Entry Auth. Req.)",
    "[6] Remote Operator Logon/Logoff",
];

/// Columns the menu items sit to the right of the rule's left edge.
const MENU_INSET: usize = 3;

/// The menu screen for a terminal `cols` wide, lines joined with `\n`.
///
/// Narrow terminals clamp all padding to zero rather than truncating text.
#[must_use]
pub fn menu_text(cols: u16) -> String {
    let cols = usize::from(cols);
    let center = |s: &str| format!("{}{s}", " ".repeat(cols.saturating_sub(s.len()) / 2));

    let gap = cols.saturating_sub(HEADER_LEFT.len() + HEADER_RIGHT.len());
    let indent = " ".repeat(cols.saturating_sub(RULE.len()) / 2 + MENU_INSET);

    let mut lines = vec![
        format!("{HEADER_LEFT}{}{HEADER_RIGHT}", " ".repeat(gap)),
        center(TITLE),
        String::new(),
        center(SUBTITLE),
        String::new(),
        center(BANNER),
        center(RULE),
        String::new(),
    ];
    lines.extend(MENU.iter().map(|item| format!("{indent}{item}")));
    lines.extend([
        String::new(),
        center(RULE),
        String::new(),
        center(PROMPT),
    ]);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn eighty_columns() {
        let text = menu_text(80);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 18);
        assert_eq!(
            lines[0],
            "DATANET PROC RECORD:  45-3456-W-3452                            Transnet on/xc-3"
        );
        assert_eq!(lines[0].len(), 80);
        assert_eq!(lines[1], format!("{}{TITLE}", " ".repeat(25)));
        assert_eq!(lines[2], "");
        assert_eq!(lines[6], format!("{}{RULE}", " ".repeat(8)));
        assert_eq!(lines[8], format!("{}{}", " ".repeat(11), MENU[0]));
        assert_eq!(lines[13], format!("{}{}", " ".repeat(11), MENU[5]));
        assert_eq!(lines[17], format!("{}{PROMPT}", " ".repeat(23)));
    }

    #[test]
    fn narrow_terminal_clamps_padding() {
        let text = menu_text(20);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("{HEADER_LEFT}{HEADER_RIGHT}"));
        assert_eq!(lines[5], BANNER);
        assert_eq!(lines[8], format!("   {}", MENU[0]));
    }

    #[test]
    fn zero_width() {
        let text = menu_text(0);
        assert!(text.starts_with(HEADER_LEFT));
        assert!(text.ends_with(PROMPT));
    }

    #[test]
    fn no_trailing_newline() {
        assert!(!menu_text(100).ends_with('\n'));
    }
}
