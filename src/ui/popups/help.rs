//! Help popup showing the dashboard key bindings.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::theme::Theme;
use crate::ui::helpers::create_popup_block;
use crate::ui::layout::centered_popup_area;

/// Key binding sections with descriptions.
const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Accounts",
        &[
            ("↑ / k", "Previous account"),
            ("↓ / j", "Next account"),
            ("0-8", "Jump to account"),
            ("c", "Copy address"),
        ],
    ),
    (
        "Balances",
        &[
            ("t", "Set token balance"),
            ("s", "Set staked tokens"),
            ("Enter", "Save input"),
            ("Esc", "Cancel input"),
        ],
    ),
    (
        "General",
        &[
            ("m", "Cycle theme"),
            ("r", "Retry failed setup"),
            ("?", "Toggle help"),
            ("q / Esc", "Quit"),
        ],
    ),
];

/// Renders the help popup.
pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
    let height = HELP_SECTIONS
        .iter()
        .map(|(_, bindings)| bindings.len() as u16 + 2)
        .sum::<u16>()
        + 2;
    let popup_area = centered_popup_area(area, 44, height);
    frame.render_widget(Clear, popup_area);

    let block = create_popup_block("Help (? to close)", theme);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = Vec::new();
    for (section_title, bindings) in HELP_SECTIONS {
        lines.push(Line::styled(*section_title, theme.focused_title_style()));
        for (key, description) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme.focused_border_style()),
                Span::raw(*description),
            ]));
        }
        lines.push(Line::raw(""));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, test_terminal};
    use ratatui::{Terminal, backend::TestBackend};
    use rstest::rstest;

    #[rstest]
    fn test_help_lists_sections(mut test_terminal: Terminal<TestBackend>) {
        test_terminal
            .draw(|frame| render(frame, frame.area(), &Theme::default()))
            .unwrap();

        let text = buffer_text(test_terminal.backend().buffer());
        assert!(text.contains("Help (? to close)"));
        for (section, _) in HELP_SECTIONS {
            assert!(text.contains(section), "missing section {section}");
        }
        assert!(text.contains("Set staked tokens"));
    }
}
