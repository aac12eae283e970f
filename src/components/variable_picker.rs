//! Drag-and-drop dialog assigning dataset columns to analysis roles.
//!
//! DESIGN
//! ======
//! A column occupies at most one role: dropping it into Y releases it from
//! X and vice versa. X holds at most three columns and ignores duplicates.
//! Confirm gating is mode-dependent: hypothesis needs Y plus at least one X,
//! SPC needs only Y, capability needs Y plus numeric spec limits with
//! USL > LSL. The mutation and gating rules live in plain functions below
//! the component so they can be tested without a DOM.

#[cfg(test)]
#[path = "variable_picker_test.rs"]
mod variable_picker_test;

use std::collections::BTreeMap;

use leptos::prelude::*;

use crate::net::types::ColumnStats;

/// Which analysis flow the picker is gathering variables for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerMode {
    Hypothesis,
    Spc,
    Capability,
}

/// Upper and lower specification limits for capability analysis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpecLimits {
    pub usl: f64,
    pub lsl: f64,
}

/// Selection emitted when the user confirms.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableSelection {
    pub y_variable: String,
    pub x_variables: Vec<String>,
    pub spec_limits: Option<SpecLimits>,
}

const MAX_X_VARIABLES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DropZone {
    Y,
    X,
}

/// Modal variable picker. The parent controls visibility; internal state is
/// fresh on every mount and cleared again on confirm.
#[component]
pub fn VariablePickerDialog(
    mode: PickerMode,
    columns: Vec<String>,
    #[prop(optional_no_strip)] column_stats: Option<BTreeMap<String, ColumnStats>>,
    on_close: Callback<()>,
    on_confirm: Callback<VariableSelection>,
) -> impl IntoView {
    let y_variable = RwSignal::new(None::<String>);
    let x_variables = RwSignal::new(Vec::<String>::new());
    let drag_over_zone = RwSignal::new(None::<DropZone>);
    let usl_input = RwSignal::new(String::new());
    let lsl_input = RwSignal::new(String::new());
    // Stored so the hint closure stays `Copy` inside the capability section.
    let column_stats = StoredValue::new(column_stats);

    let limits = move || parse_spec_limits(&usl_input.get(), &lsl_input.get());

    let confirm_enabled = move || {
        can_confirm(
            mode,
            y_variable.get().as_deref(),
            x_variables.get().len(),
            limits(),
        )
    };

    let limits_inverted = move || limits().is_some_and(|l| l.usl <= l.lsl);

    let stats_hint = move || {
        y_variable.get().and_then(|y| {
            column_stats.with_value(|stats| {
                stats.as_ref().and_then(|all| all.get(&y)).map(|s| {
                    format!(
                        "{y}: 均值 {:.2}，标准差 {:.2}，范围 {:.2} ~ {:.2}",
                        s.mean, s.std, s.min, s.max
                    )
                })
            })
        })
    };

    let on_drop_y = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        drag_over_zone.set(None);
        let Some(column) = dropped_column(&ev) else {
            return;
        };
        x_variables.update(|xs| y_variable.update(|y| assign_y(y, xs, &column)));
    };

    let on_drop_x = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        drag_over_zone.set(None);
        let Some(column) = dropped_column(&ev) else {
            return;
        };
        x_variables.update(|xs| y_variable.update(|y| assign_x(y, xs, &column)));
    };

    let handle_confirm = move |_| {
        let Some(y) = y_variable.get_untracked() else {
            return;
        };
        let spec_limits = parse_spec_limits(&usl_input.get_untracked(), &lsl_input.get_untracked());
        let xs = x_variables.get_untracked();
        if !can_confirm(mode, Some(&y), xs.len(), spec_limits) {
            return;
        }

        y_variable.set(None);
        x_variables.set(Vec::new());
        usl_input.set(String::new());
        lsl_input.set(String::new());
        on_confirm.run(VariableSelection {
            y_variable: y,
            x_variables: xs,
            spec_limits: if mode == PickerMode::Capability {
                spec_limits
            } else {
                None
            },
        });
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog dialog--picker" on:click=move |ev| ev.stop_propagation()>
                <div class="dialog__header">
                    <h2>"🧪 " {mode_title(mode)}</h2>
                    <button class="dialog__close" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>

                <div class="picker__section-label">"可用字段（拖拽到下方区域）"</div>
                <div class="picker__fields">
                    {columns
                        .iter()
                        .map(|col| {
                            let drag_name = col.clone();
                            let check_name = col.clone();
                            let label = col.clone();
                            let assigned = move || {
                                y_variable.get().as_deref() == Some(check_name.as_str())
                                    || x_variables.get().iter().any(|x| x == &check_name)
                            };
                            view! {
                                <span
                                    class="picker__chip"
                                    class:picker__chip--assigned=assigned
                                    draggable="true"
                                    on:dragstart=move |ev| start_drag(&ev, &drag_name)
                                >
                                    {label}
                                </span>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>

                <div class="picker__section-label picker__section-label--y">
                    {mode_y_label(mode)}
                </div>
                <div
                    class="picker__zone"
                    class:picker__zone--over=move || drag_over_zone.get() == Some(DropZone::Y)
                    on:dragover=move |ev| allow_drop(&ev)
                    on:dragenter=move |_| drag_over_zone.set(Some(DropZone::Y))
                    on:dragleave=move |_| drag_over_zone.set(None)
                    on:drop=on_drop_y
                >
                    {move || {
                        y_variable
                            .get()
                            .map_or_else(
                                || {
                                    view! {
                                        <span class="picker__placeholder">"拖拽字段到此处..."</span>
                                    }
                                        .into_any()
                                },
                                |y| {
                                    view! {
                                        <span class="picker__chip picker__chip--y">
                                            {y}
                                            <button
                                                class="picker__chip-remove"
                                                on:click=move |_| y_variable.set(None)
                                            >
                                                "×"
                                            </button>
                                        </span>
                                    }
                                        .into_any()
                                },
                            )
                    }}
                </div>

                <Show when=move || mode == PickerMode::Hypothesis>
                    <div class="picker__section-label picker__section-label--x">
                        "X（自变量）— 拖入最多 3 个字段"
                    </div>
                    <div
                        class="picker__zone"
                        class:picker__zone--over=move || drag_over_zone.get() == Some(DropZone::X)
                        on:dragover=move |ev| allow_drop(&ev)
                        on:dragenter=move |_| drag_over_zone.set(Some(DropZone::X))
                        on:dragleave=move |_| drag_over_zone.set(None)
                        on:drop=on_drop_x
                    >
                        {move || {
                            let xs = x_variables.get();
                            if xs.is_empty() {
                                return view! {
                                    <span class="picker__placeholder">"拖拽字段到此处..."</span>
                                }
                                    .into_any();
                            }

                            xs.into_iter()
                                .map(|col| {
                                    let removed = col.clone();
                                    view! {
                                        <span class="picker__chip picker__chip--x">
                                            {col}
                                            <button
                                                class="picker__chip-remove"
                                                on:click=move |_| {
                                                    x_variables.update(|xs| xs.retain(|x| x != &removed));
                                                }
                                            >
                                                "×"
                                            </button>
                                        </span>
                                    }
                                })
                                .collect::<Vec<_>>()
                                .into_any()
                        }}
                    </div>
                </Show>

                <Show when=move || mode == PickerMode::Capability>
                    <div class="picker__section-label picker__section-label--limits">
                        "规格限（USL 必须大于 LSL）"
                    </div>
                    <div class="picker__limits">
                        <label class="dialog__label">
                            "USL（规格上限）"
                            <input
                                class="dialog__input"
                                type="number"
                                step="any"
                                prop:value=move || usl_input.get()
                                on:input=move |ev| usl_input.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="dialog__label">
                            "LSL（规格下限）"
                            <input
                                class="dialog__input"
                                type="number"
                                step="any"
                                prop:value=move || lsl_input.get()
                                on:input=move |ev| lsl_input.set(event_target_value(&ev))
                            />
                        </label>
                    </div>
                    <Show when=limits_inverted>
                        <div class="picker__limits-error">"USL 必须大于 LSL"</div>
                    </Show>
                    {move || {
                        stats_hint()
                            .map(|hint| view! { <div class="picker__stats-hint">{hint}</div> })
                    }}
                </Show>

                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>
                        "取消"
                    </button>
                    <button
                        class="btn btn--primary"
                        disabled=move || !confirm_enabled()
                        on:click=handle_confirm
                    >
                        "确认分析"
                    </button>
                </div>
            </div>
        </div>
    }
}

fn mode_title(mode: PickerMode) -> &'static str {
    match mode {
        PickerMode::Hypothesis => "选择分析变量",
        PickerMode::Spc => "选择 SPC 分析变量",
        PickerMode::Capability => "选择能力分析变量",
    }
}

fn mode_y_label(mode: PickerMode) -> &'static str {
    match mode {
        PickerMode::Hypothesis => "Y（因变量）— 拖入 1 个字段",
        PickerMode::Spc => "Y（监控指标）— 拖入 1 个字段",
        PickerMode::Capability => "Y（质量特性）— 拖入 1 个字段",
    }
}

/// Assign a column to Y, releasing it from X if held there.
fn assign_y(y: &mut Option<String>, xs: &mut Vec<String>, column: &str) {
    xs.retain(|x| x != column);
    *y = Some(column.to_owned());
}

/// Assign a column to X: releases a matching Y, ignores duplicates, and
/// caps the list at [`MAX_X_VARIABLES`].
fn assign_x(y: &mut Option<String>, xs: &mut Vec<String>, column: &str) {
    if y.as_deref() == Some(column) {
        *y = None;
    }
    if xs.iter().any(|x| x == column) || xs.len() >= MAX_X_VARIABLES {
        return;
    }
    xs.push(column.to_owned());
}

/// Whether confirm is allowed for this mode and selection.
fn can_confirm(
    mode: PickerMode,
    y: Option<&str>,
    x_count: usize,
    limits: Option<SpecLimits>,
) -> bool {
    match mode {
        PickerMode::Hypothesis => y.is_some() && x_count >= 1,
        PickerMode::Spc => y.is_some(),
        PickerMode::Capability => y.is_some() && limits.is_some_and(|l| l.usl > l.lsl),
    }
}

/// Both limit fields parsed as numbers, or `None` while either is blank
/// or malformed.
fn parse_spec_limits(usl: &str, lsl: &str) -> Option<SpecLimits> {
    let usl = usl.trim().parse::<f64>().ok()?;
    let lsl = lsl.trim().parse::<f64>().ok()?;
    Some(SpecLimits { usl, lsl })
}

fn start_drag(ev: &leptos::ev::DragEvent, column: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(transfer) = ev.data_transfer() {
            let _ = transfer.set_data("text/plain", column);
            transfer.set_effect_allowed("move");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (ev, column);
}

fn dropped_column(ev: &leptos::ev::DragEvent) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        ev.data_transfer()
            .and_then(|transfer| transfer.get_data("text/plain").ok())
            .filter(|column| !column.is_empty())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = ev;
        None
    }
}

fn allow_drop(ev: &leptos::ev::DragEvent) {
    ev.prevent_default();
    #[cfg(feature = "hydrate")]
    if let Some(transfer) = ev.data_transfer() {
        transfer.set_drop_effect("move");
    }
}
