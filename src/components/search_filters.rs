//! Filter bar above the session history table.
//!
//! The time dropdown writes its range token (`today`, `7days`, `30days`)
//! into `start_date`; the history page turns tokens into concrete ISO
//! bounds right before querying.

use leptos::prelude::*;

use crate::net::types::SessionsQuery;
use crate::util::industries::{
    ALL_INDUSTRIES, industry_from_value, industry_icon, industry_label, industry_value,
};

const METHODS: [(&str, &str); 9] = [
    ("", "全部方法"),
    ("t_test", "t 检验"),
    ("mann_whitney_u", "Mann–Whitney U"),
    ("anova", "ANOVA"),
    ("kruskal", "Kruskal–Wallis"),
    ("linear_regression", "线性回归"),
    ("pearson", "Pearson 相关"),
    ("spearman", "Spearman 相关"),
    ("chi_square", "卡方检验"),
];

const TIME_RANGES: [(&str, &str); 4] = [
    ("", "全部时间"),
    ("today", "今天"),
    ("7days", "近7天"),
    ("30days", "近30天"),
];

/// Keyword, industry, time-range and method filters plus the search button.
#[component]
pub fn SearchFilters(filters: RwSignal<SessionsQuery>, on_search: Callback<()>) -> impl IntoView {
    let on_keyword = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        filters.update(|f| f.keyword = (!value.is_empty()).then_some(value));
    };
    let on_industry = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        filters.update(|f| f.industry = industry_from_value(&value));
    };
    let on_time = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        filters.update(|f| f.start_date = (!value.is_empty()).then_some(value));
    };
    let on_method = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        filters.update(|f| f.method = (!value.is_empty()).then_some(value));
    };

    let industry_options = ALL_INDUSTRIES
        .iter()
        .map(|industry| {
            let industry = *industry;
            view! {
                <option
                    value=industry_value(industry)
                    selected=move || filters.with(|f| f.industry == Some(industry))
                >
                    {format!("{} {}", industry_icon(industry), industry_label(industry))}
                </option>
            }
        })
        .collect::<Vec<_>>();

    let time_options = TIME_RANGES
        .into_iter()
        .map(|(value, label)| {
            view! {
                <option
                    value=value
                    selected=move || {
                        filters.with(|f| f.start_date.as_deref().unwrap_or("") == value)
                    }
                >
                    {label}
                </option>
            }
        })
        .collect::<Vec<_>>();

    let method_options = METHODS
        .into_iter()
        .map(|(value, label)| {
            view! {
                <option
                    value=value
                    selected=move || filters.with(|f| f.method.as_deref().unwrap_or("") == value)
                >
                    {label}
                </option>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="search-filters">
            <input
                class="search-filters__keyword"
                type="text"
                placeholder="搜索关键词..."
                prop:value=move || filters.with(|f| f.keyword.clone().unwrap_or_default())
                on:input=on_keyword
            />
            <label class="search-filters__field">
                <span class="search-filters__label">"行业"</span>
                <select class="search-filters__select" on:change=on_industry>
                    <option value="" selected=move || filters.with(|f| f.industry.is_none())>
                        "全部行业"
                    </option>
                    {industry_options}
                </select>
            </label>
            <label class="search-filters__field">
                <span class="search-filters__label">"时间"</span>
                <select class="search-filters__select" on:change=on_time>
                    {time_options}
                </select>
            </label>
            <label class="search-filters__field">
                <span class="search-filters__label">"方法"</span>
                <select class="search-filters__select" on:change=on_method>
                    {method_options}
                </select>
            </label>
            <button class="btn btn--primary search-filters__submit" on:click=move |_| on_search.run(())>
                "🔍 搜索"
            </button>
        </div>
    }
}
