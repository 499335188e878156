//! 月別応募数の棒グラフ

use leptos::prelude::*;
use chrono::NaiveDate;
use job_tracker_common::{monthly_histogram, JobRecord};

#[component]
pub fn MonthlyChart(
    jobs: ReadSignal<Vec<JobRecord>>,
    today: NaiveDate,
    months_back: usize,
) -> impl IntoView {
    let buckets = Memo::new(move |_| jobs.with(|j| monthly_histogram(j, today, months_back)));

    view! {
        <div class="chart-card">
            <h3>"Monthly Applications"</h3>
            <div class="bar-chart">
                {move || {
                    let buckets = buckets.get();
                    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1);
                    buckets
                        .into_iter()
                        .map(|bucket| {
                            let height = bucket.count * 100 / max;
                            view! {
                                <div class="bar-column" title=format!("{} {}", bucket.label, bucket.year)>
                                    <span class="bar-count">{bucket.count}</span>
                                    <div class="bar" style=format!("height: {}%", height) />
                                    <span class="bar-label">{bucket.label}</span>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
