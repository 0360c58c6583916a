pub use overrides::{AtomOverrides, OverrideWarning, OVERRIDE_TEMPLATE};
pub use plot::{
    AtomConfig, BondConfig, ContourConfig, LabelConfig, LineConfig, LineStyle, PlotConfig,
    PlotConfigError, SaveConfig,
};

mod overrides;
mod plot;
