//! Stepper showing how far an analysis pipeline has progressed.
//!
//! Each module has its own step sequence; `active_step` equal to the step
//! count marks the whole pipeline complete.

use leptos::prelude::*;

const HYPOTHESIS_STEPS: [&str; 6] = ["数据识别", "前提校验", "方法选择", "统计计算", "效应量", "结论建议"];
const SPC_STEPS: [&str; 5] = ["数据识别", "图型选择", "控制限计算", "异常检测", "结论建议"];
const CAPABILITY_STEPS: [&str; 5] = ["数据识别", "正态性检验", "指标计算", "能力评估", "结论建议"];

fn stepper(labels: &'static [&'static str], active_step: usize, loading: bool) -> impl IntoView {
    let steps = labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let done = index < active_step;
            let active = index == active_step;
            view! {
                <div
                    class="progress-stepper__step"
                    class:progress-stepper__step--done=done
                    class:progress-stepper__step--active=active
                    class:progress-stepper__step--pulsing=active && loading
                >
                    <span class="progress-stepper__dot">
                        {if done { "✓".to_owned() } else { (index + 1).to_string() }}
                    </span>
                    <span class="progress-stepper__label">{*label}</span>
                </div>
            }
        })
        .collect::<Vec<_>>();

    view! { <div class="progress-stepper">{steps}</div> }
}

/// Six-step hypothesis-testing pipeline stepper.
#[component]
pub fn AnalysisProgress(active_step: usize, #[prop(optional)] loading: bool) -> impl IntoView {
    stepper(&HYPOTHESIS_STEPS, active_step, loading)
}

/// Five-step control-chart pipeline stepper.
#[component]
pub fn SpcProgress(active_step: usize, #[prop(optional)] loading: bool) -> impl IntoView {
    stepper(&SPC_STEPS, active_step, loading)
}

/// Five-step process-capability pipeline stepper.
#[component]
pub fn CapabilityProgress(active_step: usize, #[prop(optional)] loading: bool) -> impl IntoView {
    stepper(&CAPABILITY_STEPS, active_step, loading)
}
