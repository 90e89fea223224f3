mod action_map;
mod builder;
mod compiled;
mod error;
mod interner;
mod io;
mod navigator;
mod report;
mod simulator;
mod spec;

pub use builder::GraphBuilder;
pub use compiled::CompiledGraph;
pub use error::GraphError;
pub use interner::ActionInterner;
pub use io::{
    compile_json, compile_navigator_json, compile_yaml, load_json, load_navigator_json,
    load_yaml, save_json, save_report_json, save_yaml,
};
pub use navigator::{NavigatorEdge, NavigatorGraph, NavigatorState, navigator_to_spec};
pub use report::{PolicyReport, StateReport};
pub use simulator::{Episode, EpisodeEnd, PolicySimulator};
pub use spec::{EdgeSpec, GraphSpec, StateSpec};
