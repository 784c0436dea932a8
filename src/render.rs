//! Response → view model.
//!
//! Pure and idempotent: rendering the same response twice yields the same view,
//! and front-ends replace whatever they showed before.

use std::fmt;

use crate::api::{ComprehensiveAnalysis, PredictionResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Include confidence percentages and reasoning lines.
    pub show_details: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetBlock {
    /// 1-based.
    pub ordinal: usize,
    pub label: String,
    pub chips: Vec<u32>,
    /// Rounded percent, e.g. `73` for a 0.731 score.
    pub confidence_pct: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultView {
    pub sets: Vec<SetBlock>,
    pub reasoning: Vec<String>,
    pub summary: Option<String>,
    pub disclaimer: Option<String>,
}

impl ResultView {
    pub fn has_details(&self) -> bool {
        !self.reasoning.is_empty() || self.sets.iter().any(|s| s.confidence_pct.is_some())
    }
}

pub fn set_label(ordinal: usize) -> String {
    format!("Set {ordinal}")
}

pub fn percent(score: f64) -> u32 {
    if !score.is_finite() {
        return 0;
    }
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}

pub fn render_prediction(resp: &PredictionResponse, opts: RenderOptions) -> ResultView {
    let scores = resp
        .confidence_scores
        .as_deref()
        .filter(|_| opts.show_details)
        .unwrap_or(&[]);

    let sets = resp
        .sets
        .iter()
        .enumerate()
        .map(|(i, numbers)| SetBlock {
            ordinal: i + 1,
            label: set_label(i + 1),
            chips: numbers.clone(),
            confidence_pct: scores.get(i).copied().map(percent),
        })
        .collect();

    let reasoning = if opts.show_details {
        resp.reasoning.clone().unwrap_or_default()
    } else {
        Vec::new()
    };

    ResultView {
        sets,
        reasoning,
        summary: resp.analysis_summary.clone().filter(|_| opts.show_details),
        disclaimer: resp.disclaimer.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonRow {
    pub season: String,
    pub draw_count: u32,
    /// `(number, count)`, at most [`SEASON_TOP_N`] entries.
    pub top: Vec<(u32, u32)>,
}

pub const SEASON_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisView {
    pub total_draws: Option<u32>,
    pub hot: Vec<u32>,
    pub cold: Vec<u32>,
    pub odd_pct: u32,
    pub even_pct: u32,
    /// Sorted by season name.
    pub seasons: Vec<SeasonRow>,
}

pub fn render_analysis(analysis: &ComprehensiveAnalysis) -> AnalysisView {
    // BTreeMap iteration is already ordered by key.
    let seasons = analysis
        .seasonal_analysis
        .iter()
        .map(|(season, stats)| SeasonRow {
            season: season.clone(),
            draw_count: stats.draw_count,
            top: stats.hot_numbers.iter().take(SEASON_TOP_N).copied().collect(),
        })
        .collect();

    AnalysisView {
        total_draws: analysis.total_draws,
        hot: analysis.hot_numbers.clone(),
        cold: analysis.cold_numbers.clone(),
        odd_pct: percent(analysis.odd_even_ratio.odd_ratio),
        even_pct: percent(analysis.odd_even_ratio.even_ratio),
        seasons,
    }
}

fn write_chips(f: &mut fmt::Formatter<'_>, chips: &[u32]) -> fmt::Result {
    for (i, n) in chips.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "[{n:>2}]")?;
    }
    Ok(())
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for set in &self.sets {
            write!(f, "{:<6} ", set.label)?;
            write_chips(f, &set.chips)?;
            if let Some(pct) = set.confidence_pct {
                write!(f, "  ({pct}% confidence)")?;
            }
            writeln!(f)?;
        }
        if let Some(summary) = &self.summary {
            writeln!(f, "\n{summary}")?;
        }
        if !self.reasoning.is_empty() {
            writeln!(f, "\nReasoning:")?;
            for line in &self.reasoning {
                writeln!(f, "  - {line}")?;
            }
        }
        if let Some(d) = &self.disclaimer {
            writeln!(f, "\n{d}")?;
        }
        Ok(())
    }
}

impl fmt::Display for AnalysisView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(total) = self.total_draws {
            writeln!(f, "Draws analysed: {total}")?;
        }
        write!(f, "Hot:  ")?;
        write_chips(f, &self.hot)?;
        writeln!(f)?;
        write!(f, "Cold: ")?;
        write_chips(f, &self.cold)?;
        writeln!(f)?;
        writeln!(f, "Odd/Even: {}% / {}%", self.odd_pct, self.even_pct)?;
        for row in &self.seasons {
            write!(f, "{:<8} ({} draws) ", row.season, row.draw_count)?;
            for (n, count) in &row.top {
                write!(f, " {n}×{count}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{OddEvenRatio, SeasonStats};

    #[test]
    fn single_set_renders_six_ordered_chips() {
        let resp = PredictionResponse {
            sets: vec![vec![1, 2, 3, 4, 5, 6]],
            ..Default::default()
        };
        let view = render_prediction(&resp, RenderOptions::default());
        assert_eq!(view.sets.len(), 1);
        assert_eq!(view.sets[0].label, "Set 1");
        assert_eq!(view.sets[0].chips, vec![1, 2, 3, 4, 5, 6]);
        assert!(!view.has_details());
    }

    #[test]
    fn details_only_when_requested() {
        let resp = PredictionResponse {
            sets: vec![vec![3, 11, 19, 24, 38, 42], vec![7, 8, 9, 10, 11, 12]],
            confidence_scores: Some(vec![0.731]),
            reasoning: Some(vec!["hot numbers weighted".into()]),
            analysis_summary: Some("unified, 2 sets".into()),
            disclaimer: Some("For reference only.".into()),
        };

        let hidden = render_prediction(&resp, RenderOptions::default());
        assert!(!hidden.has_details());
        assert!(hidden.summary.is_none());
        assert_eq!(hidden.disclaimer.as_deref(), Some("For reference only."));

        let shown = render_prediction(&resp, RenderOptions { show_details: true });
        assert_eq!(shown.sets[0].confidence_pct, Some(73));
        assert_eq!(shown.sets[1].confidence_pct, None);
        assert_eq!(shown.sets[1].label, "Set 2");
        assert_eq!(shown.reasoning, vec!["hot numbers weighted".to_string()]);
    }

    #[test]
    fn rendering_is_repeatable() {
        let resp = PredictionResponse {
            sets: vec![vec![5, 6]],
            ..Default::default()
        };
        let a = render_prediction(&resp, RenderOptions::default());
        let b = render_prediction(&resp, RenderOptions::default());
        assert_eq!(a, b);
        assert_eq!(resp.sets, vec![vec![5, 6]]);
    }

    #[test]
    fn text_output_lists_chips_in_order() {
        let resp = PredictionResponse {
            sets: vec![vec![1, 2, 3, 4, 5, 6]],
            ..Default::default()
        };
        let text = render_prediction(&resp, RenderOptions::default()).to_string();
        assert!(text.starts_with("Set 1  [ 1] [ 2] [ 3] [ 4] [ 5] [ 6]"), "{text}");
    }

    #[test]
    fn percent_clamps() {
        assert_eq!(percent(-0.2), 0);
        assert_eq!(percent(1.7), 100);
        assert_eq!(percent(f64::NAN), 0);
        assert_eq!(percent(0.516), 52);
    }

    #[test]
    fn analysis_view_sorts_seasons_and_caps_top() {
        let mut a = ComprehensiveAnalysis {
            hot_numbers: vec![34, 12],
            cold_numbers: vec![9],
            odd_even_ratio: OddEvenRatio {
                odd_ratio: 0.524,
                even_ratio: 0.476,
            },
            ..Default::default()
        };
        a.seasonal_analysis.insert(
            "winter".into(),
            SeasonStats {
                draw_count: 12,
                hot_numbers: (1..=8).map(|n| (n, 10 - n)).collect(),
            },
        );
        a.seasonal_analysis.insert(
            "autumn".into(),
            SeasonStats {
                draw_count: 11,
                hot_numbers: vec![(4, 3)],
            },
        );

        let v = render_analysis(&a);
        assert_eq!(v.odd_pct, 52);
        assert_eq!(v.even_pct, 48);
        let names: Vec<&str> = v.seasons.iter().map(|s| s.season.as_str()).collect();
        assert_eq!(names, vec!["autumn", "winter"]);
        assert_eq!(v.seasons[1].top.len(), SEASON_TOP_N);
        assert!(v.to_string().contains("Odd/Even: 52% / 48%"));
    }
}
