use leptos::prelude::*;
use lotto_gate::api::Disclaimer;
use lotto_gate::render::{AnalysisView, ResultView};

fn chips(numbers: Vec<u32>) -> impl IntoView {
    numbers
        .into_iter()
        .map(|n| view! { <div class="number">{n}</div> })
        .collect_view()
}

#[component]
pub(super) fn ResultPanel(result: ResultView) -> impl IntoView {
    let ResultView {
        sets,
        reasoning,
        summary,
        disclaimer,
    } = result;

    let sets = sets
        .into_iter()
        .map(|set| {
            let confidence = set
                .confidence_pct
                .map(|p| view! { <div class="confidence">{format!("{p}% confidence")}</div> });
            view! {
                <div class="number-set">
                    <h4>{set.label}</h4>
                    <div class="numbers">{chips(set.chips)}</div>
                    {confidence}
                </div>
            }
        })
        .collect_view();

    let reasoning = (!reasoning.is_empty()).then(|| {
        view! {
            <div id="prediction-reasoning" class="reasoning">
                <h4>"Why these numbers"</h4>
                <ul>
                    {reasoning.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                </ul>
            </div>
        }
    });

    view! {
        <div id="prediction-results" class="prediction-results">
            <div id="number-sets">{sets}</div>
            {summary.map(|s| view! { <p class="summary">{s}</p> })}
            {reasoning}
            {disclaimer.map(|d| view! { <p class="disclaimer small">{d}</p> })}
        </div>
    }
}

#[component]
pub(super) fn AnalysisPanel(analysis: AnalysisView) -> impl IntoView {
    let seasons = analysis
        .seasons
        .into_iter()
        .map(|row| {
            let top = row
                .top
                .iter()
                .map(|(n, count)| format!("{n}×{count}"))
                .collect::<Vec<_>>()
                .join(" ");
            view! {
                <tr>
                    <td>{row.season}</td>
                    <td>{row.draw_count}</td>
                    <td>{top}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="analysis">
            {analysis.total_draws.map(|t| view! { <p>{format!("Draws analysed: {t}")}</p> })}
            <h4>"Hot numbers"</h4>
            <div class="numbers">{chips(analysis.hot)}</div>
            <h4>"Cold numbers"</h4>
            <div class="numbers">{chips(analysis.cold)}</div>
            <p>{format!("Odd/Even: {}% / {}%", analysis.odd_pct, analysis.even_pct)}</p>
            <table class="seasons">
                <thead>
                    <tr><th>"Season"</th><th>"Draws"</th><th>"Top numbers"</th></tr>
                </thead>
                <tbody>{seasons}</tbody>
            </table>
        </div>
    }
}

#[component]
pub(super) fn DisclaimerFooter(disclaimer: Disclaimer) -> impl IntoView {
    view! {
        <footer class="disclaimer">
            <h4>{disclaimer.title}</h4>
            {disclaimer.content.into_iter().map(|line| view! { <p class="small">{line}</p> }).collect_view()}
            {disclaimer.contact.map(|c| view! { <p class="small">{format!("Contact: {c}")}</p> })}
        </footer>
    }
}
