//! Terminal rendering for the experiment screens.
//!
//! Every function returns a `String` so the binaries stay thin and the layout
//! can be tested without a terminal.

use crate::advisor::{advice_message, OFFLINE_MESSAGE};
use crate::analytics::SessionAnalytics;
use crate::constants::{POINTS_PER_CORRECT, THREAT_ITEMS};
use crate::session::Progress;
use crate::types::{Mode, Trial};

const CHART_WIDTH: usize = 40;

/// Title banner.
pub fn title() -> String {
    "✈️  SkyGuard Security Interface".to_string()
}

/// Mission briefing shown on the main menu.
pub fn briefing() -> String {
    let mut out = String::new();
    out.push_str("🛡️  Mission Briefing\n");
    out.push_str("Role:      Security Screening Officer\n");
    out.push_str("Objective: Inspect luggage X-rays for prohibited items.\n\n");
    out.push_str("⚠️  TARGET THREATS (LOOK FOR THESE):\n");
    out.push_str(&format!("    {}\n\n", THREAT_ITEMS.join("  ")));
    out.push_str(&format!(
        "⚡ Performance Metric: Both SPEED and ACCURACY are tracked ({POINTS_PER_CORRECT} points per correct call).\n"
    ));
    out
}

/// Main menu controls.
pub fn menu_controls() -> String {
    "Select your experimental protocol:\n  [m] START MANUAL MODE\n  [a] START AI ASSIST MODE\n  [v] run verification (developer)\n  [q] quit\n"
        .to_string()
}

/// The X-ray view of a bag.
pub fn bag_view(trial: &Trial) -> String {
    let inner = trial.items.join("  ");
    let bar = "═".repeat(inner.chars().count() + 4);
    format!("╔{bar}╗\n║  {inner}  ║\n╚{bar}╝")
}

/// Advisor line for the current bag.
pub fn advisor_panel(mode: Mode, trial: &Trial) -> String {
    match (mode, &trial.advice) {
        (Mode::AiAssist, Some(advice)) => format!("🤖 {}", advice_message(advice)),
        _ => format!("🛑 {OFFLINE_MESSAGE}"),
    }
}

/// Per-trial controls.
pub fn trial_controls() -> String {
    "  [c] ✅ CLEAR BAG    [r] 🚨 REPORT THREAT".to_string()
}

/// `[#####-----] Bag 6/10`
pub fn progress_bar(progress: &Progress, width: usize) -> String {
    let filled = ((progress.fraction * width as f64).round() as usize).min(width);
    format!(
        "[{}{}] {}",
        "#".repeat(filled),
        "-".repeat(width - filled),
        progress.label
    )
}

/// Horizontal bar chart. Values are clamped to `[0, max]`.
pub fn bar_chart(title: &str, rows: &[(String, f64)], max: f64, unit: &str) -> String {
    let mut out = format!("{title}\n");
    let label_width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    for (label, value) in rows {
        let frac = if max > 0.0 {
            (value / max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let len = (frac * CHART_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "  {label:<label_width$} │{} {value:.2}{unit}\n",
            "█".repeat(len)
        ));
    }
    out
}

fn reaction_time_rows(analytics: &SessionAnalytics, by_result: bool) -> Vec<(String, f64)> {
    if by_result {
        analytics
            .reaction_time_by_mode_result
            .iter()
            .map(|r| (format!("{} / {}", r.mode, r.result), r.mean_seconds))
            .collect()
    } else {
        analytics
            .reaction_time_by_mode
            .iter()
            .map(|r| (r.mode.to_string(), r.mean_seconds))
            .collect()
    }
}

fn accuracy_chart(analytics: &SessionAnalytics, title: &str) -> String {
    let rows: Vec<(String, f64)> = analytics
        .accuracy_by_mode
        .iter()
        .map(|a| (a.mode.to_string(), a.accuracy_pct))
        .collect();
    bar_chart(title, &rows, 100.0, "%")
}

fn chart_max(rows: &[(String, f64)]) -> f64 {
    rows.iter().map(|(_, v)| *v).fold(0.0, f64::max)
}

/// Archive analytics shown on the main menu. Empty string when there is no data.
pub fn menu_analytics(analytics: &SessionAnalytics) -> String {
    if analytics.is_empty() {
        return String::new();
    }
    let mut out = String::from("📊 Session Analytics\n");
    let rt = reaction_time_rows(analytics, false);
    out.push_str(&bar_chart(
        "Average Reaction Time (Seconds)",
        &rt,
        chart_max(&rt),
        "s",
    ));
    out.push_str(&accuracy_chart(analytics, "Decision Accuracy (%)"));
    out
}

/// End-of-session performance report.
pub fn session_report(analytics: &SessionAnalytics) -> String {
    let mut out = format!("🏁 Protocol Complete! Final Score: {}\n\n", analytics.score);
    out.push_str("📈 Performance Report\n");
    if analytics.is_empty() {
        out.push_str("  (no decisions recorded)\n");
        return out;
    }
    let rt = reaction_time_rows(analytics, true);
    out.push_str(&bar_chart(
        "⏱️  Average Time to Decide (lower is faster)",
        &rt,
        chart_max(&rt),
        "s",
    ));
    out.push_str(&accuracy_chart(analytics, "🎯 Accuracy by Mode"));
    out
}

/// Controls on the results screen.
pub fn complete_controls() -> String {
    "  [d] 📥 Download Full Dataset (CSV)    [m] 🔄 Return to Main Menu".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::aggregate;
    use crate::types::{Advice, DecisionRecord, Outcome, Prediction};
    use std::time::Instant;

    fn trial(advice: Option<Advice>) -> Trial {
        Trial {
            items: vec!["👕", "🔫", "📚", "🧸"],
            has_threat: true,
            started_at: Instant::now(),
            advice,
        }
    }

    #[test]
    fn test_briefing_lists_threats() {
        let b = briefing();
        for t in &THREAT_ITEMS {
            assert!(b.contains(t));
        }
        assert_eq!(b.lines().count(), 8);
        assert!(b.ends_with("per correct call).\n"));
    }

    #[test]
    fn test_bar_chart_one_line_per_row() {
        let rows = vec![("Manual".to_string(), 2.0), ("AI_Assist".to_string(), 1.0)];
        let chart = bar_chart("Time", &rows, 2.0, "s");
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Time");
        assert!(lines[1].starts_with("  Manual    │"));
        assert!(lines[1].ends_with(" 2.00s"));
        assert!(lines[2].contains(&"█".repeat(CHART_WIDTH / 2)));
    }

    #[test]
    fn test_bag_view_contains_items() {
        let view = bag_view(&trial(None));
        assert!(view.contains("👕  🔫  📚  🧸"));
        assert_eq!(view.lines().count(), 3);
    }

    #[test]
    fn test_advisor_panel() {
        let advice = Advice {
            prediction: Prediction::Threat,
            confidence: 88,
        };
        assert!(advisor_panel(Mode::AiAssist, &trial(Some(advice))).contains("AI ALERT"));
        assert!(advisor_panel(Mode::Manual, &trial(None)).contains("OFFLINE"));
    }

    #[test]
    fn test_progress_bar() {
        let p = Progress {
            completed: 5,
            total: 10,
            fraction: 0.5,
            label: "Bag 6/10".to_string(),
        };
        assert_eq!(progress_bar(&p, 10), "[#####-----] Bag 6/10");
    }

    #[test]
    fn test_bar_chart_clamps() {
        let chart = bar_chart("t", &[("x".to_string(), 150.0)], 100.0, "%");
        assert!(chart.contains(&"█".repeat(CHART_WIDTH)));
        assert!(!chart.contains(&"█".repeat(CHART_WIDTH + 1)));
    }

    #[test]
    fn test_reports_guard_empty_history() {
        let empty = aggregate(&[], 0);
        assert!(menu_analytics(&empty).is_empty());
        assert!(session_report(&empty).contains("no decisions"));

        let records = vec![DecisionRecord {
            round: 1,
            mode: Mode::Manual,
            threat: false,
            user_reject: false,
            result: Outcome::Correct,
            time: 0.8,
        }];
        let report = session_report(&aggregate(&records, 10));
        assert!(report.contains("Final Score: 10"));
        assert!(report.contains("Manual / CORRECT"));
    }
}
