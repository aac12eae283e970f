//! Analysis workbench: chat column plus results column.
//!
//! DESIGN
//! ======
//! All analysis flows start here. Free-text questions go out as a single
//! chat turn. The hypothesis picker runs one backend call per X variable,
//! sequentially, so one failing factor never blocks the rest; SPC and
//! capability selections go out as a single structured task message. Every
//! async completion checks the chat generation token before writing, so a
//! reply that lands after the conversation was reset is dropped.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::analysis_progress::{AnalysisProgress, CapabilityProgress, SpcProgress};
use crate::components::analysis_steps::AnalysisSteps;
use crate::components::capability_steps::CapabilitySteps;
use crate::components::chat_input::ChatInput;
use crate::components::conclusion_panel::ConclusionPanel;
use crate::components::effect_size_bar::EffectSizeBar;
use crate::components::export_menu::ExportMenu;
use crate::components::layout::Layout;
use crate::components::message_list::MessageList;
use crate::components::method_badge::MethodBadge;
use crate::components::sidebar::Sidebar;
use crate::components::spc_steps::SpcSteps;
use crate::components::stat_card::{StatCard, StatKind};
use crate::components::variable_picker::{PickerMode, VariablePickerDialog, VariableSelection};
use crate::net::types::{
    AnalysisResult, ChatMessage, ConclusionAnalysis, DataSummary, MultiAnalysisResult, Role,
};
use crate::state::app::{AppState, ModuleType};
use crate::state::chat::ChatState;
use crate::state::session::SessionState;
use crate::util::format::{format_number, format_p_value, now_iso};

#[component]
pub fn HomePage() -> impl IntoView {
    let app = expect_context::<RwSignal<AppState>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let session = expect_context::<RwSignal<SessionState>>();

    let picker_mode = RwSignal::new(None::<PickerMode>);
    // Generation the auto-conclusion was already requested for.
    let conclusion_requested = RwSignal::new(None::<u64>);

    let messages = Signal::derive(move || chat.with(|c| c.messages.clone()));
    let loading = Signal::derive(move || chat.with(|c| c.loading));
    let conclusion = Signal::derive(move || chat.with(|c| c.conclusion.clone()));
    let conclusion_loading = Signal::derive(move || chat.with(|c| c.conclusion_loading));
    let export_disabled = Signal::derive(move || chat.with(|c| c.session_id.is_none()));

    let on_send = Callback::new(move |text: String| send_message(text, chat, session));
    let on_suggestion = Callback::new(move |text: String| send_message(text, chat, session));
    let on_open_picker = Callback::new(move |mode: PickerMode| picker_mode.set(Some(mode)));
    let on_picker_close = Callback::new(move |()| picker_mode.set(None));
    let on_picker_confirm = Callback::new(move |selection: VariableSelection| {
        let mode = picker_mode.get_untracked();
        picker_mode.set(None);
        match mode {
            Some(PickerMode::Hypothesis) => run_hypothesis(selection, chat, session),
            Some(PickerMode::Spc) => run_spc(&selection, chat, session),
            Some(PickerMode::Capability) => run_capability(&selection, chat, session),
            None => {}
        }
    });
    let on_generate_conclusion = Callback::new(move |()| generate_conclusion(chat, session));

    // Generate the report conclusion once per conversation after the first
    // analysis lands. Regeneration stays on the panel's button.
    Effect::new(move || {
        let state = chat.get();
        let has_results =
            !state.multi_results.is_empty() || state.latest_analysis_message().is_some();
        if !has_results || state.loading || state.conclusion_loading || state.conclusion.is_some() {
            return;
        }
        if conclusion_requested.get_untracked() == Some(state.generation) {
            return;
        }
        conclusion_requested.set(Some(state.generation));
        generate_conclusion(chat, session);
    });

    let sidebar = view! { <Sidebar on_open_picker=on_open_picker/> }.into_any();

    view! {
        <Layout sidebar=sidebar>
            <div class="home">
                <div class="home__chat">
                    <MessageList messages=messages loading=loading/>
                    <ChatInput on_send=on_send disabled=loading/>
                </div>

                <div class="home__results">
                    <div class="home__results-header">
                        <span class="home__results-title">"📊 分析结果"</span>
                        {move || {
                            chat.with(|c| c.session_id.clone())
                                .map(|id| {
                                    view! { <ExportMenu session_id=id disabled=export_disabled/> }
                                })
                        }}
                    </div>

                    <Show when=move || loading.get()>
                        {move || progress_view(app.get().active_module)}
                    </Show>

                    {move || {
                        let state = chat.get();
                        let summary = session.with(|s| s.data_summary.clone());
                        if !state.multi_results.is_empty() {
                            state
                                .multi_results
                                .iter()
                                .map(|result| {
                                    multi_result_view(result, summary.clone(), on_suggestion)
                                })
                                .collect::<Vec<_>>()
                                .into_any()
                        } else if let Some(analysis) =
                            state.latest_analysis_message().and_then(|m| m.analysis.clone())
                        {
                            view! {
                                <AnalysisCard
                                    result=analysis
                                    data_summary=summary
                                    on_suggestion=Some(on_suggestion)
                                />
                            }
                                .into_any()
                        } else {
                            view! {
                                <div class="home__results-empty">
                                    "上传数据并提问，分析结果将显示在这里"
                                </div>
                            }
                                .into_any()
                        }
                    }}

                    <Show when=move || {
                        chat.with(|c| {
                            !c.multi_results.is_empty() || c.latest_analysis_message().is_some()
                        })
                    }>
                        <ConclusionPanel
                            conclusion=conclusion
                            loading=conclusion_loading
                            on_generate=on_generate_conclusion
                        />
                    </Show>
                </div>
            </div>

            {move || {
                picker_mode
                    .get()
                    .zip(session.with(|s| s.data_summary.clone()))
                    .map(|(mode, summary)| {
                        view! {
                            <VariablePickerDialog
                                mode=mode
                                columns=summary.column_names.clone()
                                column_stats=summary.column_stats.clone()
                                on_close=on_picker_close
                                on_confirm=on_picker_confirm
                            />
                        }
                    })
            }}
        </Layout>
    }
}

/// One multi-X entry: the factor pair above its analysis card.
fn multi_result_view(
    result: &MultiAnalysisResult,
    data_summary: Option<DataSummary>,
    on_suggestion: Callback<String>,
) -> AnyView {
    let pair = format!("{} → {}", result.x_variable, result.y_variable);
    let analysis = result.analysis.clone();
    view! {
        <div class="home__multi-result">
            <div class="home__multi-pair">{pair}</div>
            <AnalysisCard
                result=analysis
                data_summary=data_summary
                on_suggestion=Some(on_suggestion)
            />
        </div>
    }
    .into_any()
}

fn progress_view(module: ModuleType) -> AnyView {
    match module {
        ModuleType::Hypothesis => view! { <AnalysisProgress active_step=3 loading=true/> }.into_any(),
        ModuleType::Spc => view! { <SpcProgress active_step=2 loading=true/> }.into_any(),
        ModuleType::Capability => view! { <CapabilityProgress active_step=2 loading=true/> }.into_any(),
    }
}

/// Full display for one analysis: badge row, stat cards, effect bar,
/// interpretation, and the step accordion (which owns the charts and
/// suggestion chips for its method family).
#[component]
fn AnalysisCard(
    result: AnalysisResult,
    #[prop(optional_no_strip)] data_summary: Option<DataSummary>,
    #[prop(optional_no_strip)] on_suggestion: Option<Callback<String>>,
) -> impl IntoView {
    let significant = result.significant;
    let effect = result.effect_size;
    let interpretation = result.interpretation.clone();
    let steps = steps_view(result.clone(), data_summary, on_suggestion);

    view! {
        <div class="analysis-card">
            <div class="analysis-card__badges">
                <MethodBadge method_name=result.method_name.clone()/>
                <span
                    class="analysis-card__tag"
                    class:analysis-card__tag--significant=significant
                >
                    {if significant { "显著" } else { "不显著" }}
                </span>
            </div>

            <div class="analysis-card__stats">
                <StatCard
                    title="p 值"
                    value=format_p_value(result.p_value)
                    kind=StatKind::PValue
                    significant=significant
                />
                <StatCard
                    title="显著性"
                    value=(if significant { "是" } else { "否" }).to_owned()
                    kind=StatKind::Significance
                    significant=significant
                />
                {effect
                    .map(|effect| {
                        view! {
                            <StatCard
                                title="效应量"
                                value=format_number(effect.value, 3)
                                kind=StatKind::Effect
                                level=effect.level
                            />
                        }
                    })}
            </div>

            {effect.map(|effect| view! { <EffectSizeBar effect_size=effect/> })}

            <div class="analysis-card__interpretation">{interpretation}</div>

            {steps}
        </div>
    }
}

/// Which step accordion an analysis belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StepFamily {
    Hypothesis,
    Spc,
    Capability,
}

/// Classifies a backend method identifier into its step display.
fn step_family(method: &str) -> StepFamily {
    if method.starts_with("spc") || method.starts_with("control_chart") {
        StepFamily::Spc
    } else if method.starts_with("capability") || method.starts_with("process_capability") {
        StepFamily::Capability
    } else {
        StepFamily::Hypothesis
    }
}

fn steps_view(
    result: AnalysisResult,
    data_summary: Option<DataSummary>,
    on_suggestion: Option<Callback<String>>,
) -> AnyView {
    match step_family(&result.method) {
        StepFamily::Spc => {
            view! { <SpcSteps result=result data_summary=data_summary on_suggestion=on_suggestion/> }
                .into_any()
        }
        StepFamily::Capability => view! {
            <CapabilitySteps result=result data_summary=data_summary on_suggestion=on_suggestion/>
        }
            .into_any(),
        StepFamily::Hypothesis => view! {
            <AnalysisSteps result=result data_summary=data_summary on_suggestion=on_suggestion/>
        }
            .into_any(),
    }
}

// ============================================================================
// Message composition
// ============================================================================

/// Prompt for one X factor in the multi-variable flow.
fn hypothesis_prompt(x: &str, y: &str) -> String {
    format!("请分析 {x} 对 {y} 的影响")
}

/// Structured task body for an SPC run.
fn spc_task_body(y: &str) -> String {
    serde_json::json!({ "task": "spc", "y_variable": y }).to_string()
}

/// Structured task body for a capability run.
fn capability_task_body(y: &str, usl: f64, lsl: f64) -> String {
    serde_json::json!({
        "task": "capability",
        "y_variable": y,
        "usl": usl,
        "lsl": lsl,
    })
    .to_string()
}

/// Summary message for a finished multi-X run. Only variables that actually
/// produced a result are mentioned; failures are reported through the error
/// field instead.
fn multi_summary(results: &[MultiAnalysisResult]) -> String {
    if results.is_empty() {
        return "本次影响因子分析未能得到结果，请调整变量后重试。".to_owned();
    }

    let mut lines = vec![format!("已完成 {} 项影响因子分析：", results.len())];
    for result in results {
        let verdict = if result.analysis.significant {
            "影响显著"
        } else {
            "影响不显著"
        };
        lines.push(format!(
            "- **{}**: {}，p = {}，{verdict}",
            result.x_variable,
            result.analysis.method_name,
            format_p_value(result.analysis.p_value),
        ));
    }
    lines.join("\n")
}

/// Error text listing the factors that failed, in run order.
fn multi_failure_note(failures: &[(String, String)]) -> Option<String> {
    if failures.is_empty() {
        return None;
    }
    let parts = failures
        .iter()
        .map(|(x, message)| format!("{x}（{message}）"))
        .collect::<Vec<_>>();
    Some(format!("以下变量分析失败: {}", parts.join("、")))
}

/// Analyses forwarded to the conclusion generator: every multi-X result, or
/// the latest single analysis when no multi run happened.
fn conclusion_analyses(state: &ChatState) -> Vec<ConclusionAnalysis> {
    if !state.multi_results.is_empty() {
        return state
            .multi_results
            .iter()
            .map(|result| {
                ConclusionAnalysis::from_analysis(
                    &result.analysis,
                    Some(result.x_variable.clone()),
                    Some(result.y_variable.clone()),
                )
            })
            .collect();
    }

    state
        .latest_analysis_message()
        .and_then(|message| message.analysis.as_ref())
        .map(|analysis| vec![ConclusionAnalysis::from_analysis(analysis, None, None)])
        .unwrap_or_default()
}

fn user_message(content: String) -> ChatMessage {
    ChatMessage {
        id: uuid::Uuid::new_v4().to_string(),
        role: Role::User,
        content,
        timestamp: now_iso(),
        analysis: None,
    }
}

fn assistant_message(content: String, analysis: Option<AnalysisResult>) -> ChatMessage {
    ChatMessage {
        id: uuid::Uuid::new_v4().to_string(),
        role: Role::Assistant,
        content,
        timestamp: now_iso(),
        analysis,
    }
}

// ============================================================================
// Async flows
// ============================================================================

/// Sends one free-text chat turn and appends the reply.
fn send_message(text: String, chat: RwSignal<ChatState>, session: RwSignal<SessionState>) {
    if chat.get_untracked().loading {
        return;
    }
    chat.update(|c| {
        c.push_message(user_message(text.clone()));
        c.error = None;
    });
    dispatch_chat(text, chat, session);
}

/// Ships one request body and appends the assistant's reply. The visible
/// user message is the caller's responsibility, so structured task bodies
/// can show a readable transcript line instead of JSON.
fn dispatch_chat(body: String, chat: RwSignal<ChatState>, session: RwSignal<SessionState>) {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::types::ChatRequest;

        chat.update(|c| c.loading = true);
        let token = chat.get_untracked().generation;
        let request = ChatRequest {
            session_id: chat.get_untracked().session_id.clone(),
            message: body,
            file: None,
            industry: session.get_untracked().industry,
        };
        leptos::task::spawn_local(async move {
            let result = crate::net::api::send_chat(&request).await;
            if !chat.get_untracked().is_current(token) {
                return;
            }
            chat.update(|c| {
                c.loading = false;
                match result {
                    Ok(response) => {
                        c.adopt_session(&response.session_id);
                        c.push_message(assistant_message(response.reply, response.analysis));
                    }
                    Err(message) => {
                        c.push_message(assistant_message(format!("分析出错: {message}"), None));
                        c.error = Some(message);
                    }
                }
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (body, chat, session);
}

/// Outcome of one factor's backend call in the multi-X flow.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug)]
enum FactorOutcome {
    /// Reply carried a structured analysis for this factor.
    Analysis(AnalysisResult),
    /// Reply arrived without an analysis attachment.
    Reply,
    /// The call failed; the message feeds the failure note.
    Failed(String),
    /// The conversation was reset while this factor was in flight.
    Cancelled,
}

/// Drives the sequential multi-X loop: one call per factor in order, a
/// failure recorded without stopping the factors behind it, cancellation
/// aborting the whole run. Returns the failures in run order, or `None`
/// when the run was cancelled.
#[cfg(any(test, feature = "hydrate"))]
async fn run_factors<S, Fut, R>(
    xs: &[String],
    mut send: S,
    mut record: R,
) -> Option<Vec<(String, String)>>
where
    S: FnMut(String) -> Fut,
    Fut: std::future::Future<Output = FactorOutcome>,
    R: FnMut(String, AnalysisResult),
{
    let mut failures = Vec::new();
    for x in xs {
        match send(x.clone()).await {
            FactorOutcome::Analysis(analysis) => record(x.clone(), analysis),
            FactorOutcome::Reply => {}
            FactorOutcome::Failed(message) => failures.push((x.clone(), message)),
            FactorOutcome::Cancelled => return None,
        }
    }
    Some(failures)
}

/// Sequential multi-X hypothesis flow: one chat call per X, failures caught
/// per variable, summary composed from the successes only.
fn run_hypothesis(
    selection: VariableSelection,
    chat: RwSignal<ChatState>,
    session: RwSignal<SessionState>,
) {
    let y = selection.y_variable;
    let xs = selection.x_variables;
    if xs.is_empty() {
        return;
    }

    chat.update(|c| {
        c.clear_multi_results();
        c.error = None;
        c.push_message(user_message(format!(
            "请分析 {} 对 {y} 的影响",
            xs.join("、")
        )));
        c.loading = true;
    });

    #[cfg(feature = "hydrate")]
    {
        use crate::net::types::ChatRequest;

        let token = chat.get_untracked().generation;
        let industry = session.get_untracked().industry;
        leptos::task::spawn_local(async move {
            let prompt_y = y.clone();
            let send = move |x: String| {
                let y = prompt_y.clone();
                async move {
                    if !chat.get_untracked().is_current(token) {
                        return FactorOutcome::Cancelled;
                    }
                    let request = ChatRequest {
                        session_id: chat.get_untracked().session_id.clone(),
                        message: hypothesis_prompt(&x, &y),
                        file: None,
                        industry,
                    };
                    match crate::net::api::send_chat(&request).await {
                        Ok(response) => {
                            if !chat.get_untracked().is_current(token) {
                                return FactorOutcome::Cancelled;
                            }
                            chat.update(|c| c.adopt_session(&response.session_id));
                            match response.analysis {
                                Some(analysis) => FactorOutcome::Analysis(analysis),
                                None => FactorOutcome::Reply,
                            }
                        }
                        Err(message) => FactorOutcome::Failed(message),
                    }
                }
            };
            let record = move |x: String, analysis: AnalysisResult| {
                chat.update(|c| {
                    c.push_multi_result(MultiAnalysisResult {
                        x_variable: x,
                        y_variable: y.clone(),
                        analysis,
                    });
                });
            };

            let Some(failures) = run_factors(&xs, send, record).await else {
                return;
            };
            if !chat.get_untracked().is_current(token) {
                return;
            }
            chat.update(|c| {
                let summary = multi_summary(&c.multi_results);
                c.push_message(assistant_message(summary, None));
                c.error = multi_failure_note(&failures);
                c.loading = false;
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (y, xs, session);
}

/// Single structured SPC run against the picked monitoring variable.
fn run_spc(
    selection: &VariableSelection,
    chat: RwSignal<ChatState>,
    session: RwSignal<SessionState>,
) {
    let y = selection.y_variable.clone();
    chat.update(|c| {
        c.clear_multi_results();
        c.error = None;
        c.push_message(user_message(format!("对 {y} 进行 SPC 控制图分析")));
    });
    dispatch_chat(spc_task_body(&y), chat, session);
}

/// Single structured capability run; spec limits were validated by the
/// picker before confirm was enabled.
fn run_capability(
    selection: &VariableSelection,
    chat: RwSignal<ChatState>,
    session: RwSignal<SessionState>,
) {
    let Some(limits) = selection.spec_limits else {
        return;
    };
    let y = selection.y_variable.clone();
    chat.update(|c| {
        c.clear_multi_results();
        c.error = None;
        c.push_message(user_message(format!(
            "对 {y} 进行过程能力分析（USL={}, LSL={}）",
            limits.usl, limits.lsl
        )));
    });
    dispatch_chat(capability_task_body(&y, limits.usl, limits.lsl), chat, session);
}

/// Requests the overall report conclusion with the extended timeout.
fn generate_conclusion(chat: RwSignal<ChatState>, session: RwSignal<SessionState>) {
    let state = chat.get_untracked();
    let analyses = conclusion_analyses(&state);
    if analyses.is_empty() || state.conclusion_loading {
        return;
    }

    #[cfg(feature = "hydrate")]
    {
        use crate::net::types::ConclusionRequest;

        chat.update(|c| c.conclusion_loading = true);
        let token = state.generation;
        let request = ConclusionRequest {
            session_id: state.session_id.clone(),
            analyses,
            data_summary: session.get_untracked().data_summary.clone(),
        };
        leptos::task::spawn_local(async move {
            let result = crate::net::api::generate_conclusion(&request).await;
            if !chat.get_untracked().is_current(token) {
                return;
            }
            chat.update(|c| {
                c.conclusion_loading = false;
                match result {
                    Ok(response) => c.conclusion = Some(response.conclusion),
                    Err(message) => c.error = Some(message),
                }
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = session;
}
