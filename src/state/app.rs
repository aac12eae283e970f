//! Workbench-level state: which analysis module is active.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

/// Analysis module selected in the sidebar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModuleType {
    /// Hypothesis testing of X factors against a Y response.
    #[default]
    Hypothesis,
    /// Control chart stability analysis.
    Spc,
    /// Process capability study.
    Capability,
}

impl ModuleType {
    /// Task tag carried in the structured chat message for this module.
    pub fn task(self) -> &'static str {
        match self {
            Self::Hypothesis => "auto",
            Self::Spc => "spc",
            Self::Capability => "capability",
        }
    }

    /// Selector button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hypothesis => "影响因子分析",
            Self::Spc => "SPC/稳定性分析",
            Self::Capability => "流程能力CP/CPK",
        }
    }
}

/// Top-level workbench state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub active_module: ModuleType,
}
