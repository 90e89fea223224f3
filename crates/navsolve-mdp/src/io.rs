use std::{fs, path::Path};

use log::debug;

use crate::{
    CompiledGraph, GraphError, GraphSpec, PolicyReport,
    navigator::{NavigatorGraph, navigator_to_spec},
};

/// Load a graph spec from YAML on disk.
pub fn load_yaml(path: impl AsRef<Path>) -> Result<GraphSpec, GraphError> {
    let yaml = fs::read_to_string(path.as_ref())?;
    let spec: GraphSpec = serde_yaml::from_str(&yaml)?;
    debug!("loaded {} states from {}", spec.states.len(), path.as_ref().display());
    Ok(spec)
}

/// Load a graph spec in the native schema from JSON on disk.
pub fn load_json(path: impl AsRef<Path>) -> Result<GraphSpec, GraphError> {
    let json = fs::read_to_string(path.as_ref())?;
    let spec: GraphSpec = serde_json::from_str(&json)?;
    debug!("loaded {} states from {}", spec.states.len(), path.as_ref().display());
    Ok(spec)
}

/// Load a navigator benchmark file (object keyed by state id with `Adj` lists).
pub fn load_navigator_json(path: impl AsRef<Path>) -> Result<GraphSpec, GraphError> {
    let json = fs::read_to_string(path.as_ref())?;
    let graph: NavigatorGraph = serde_json::from_str(&json)?;
    debug!("loaded {} navigator states from {}", graph.len(), path.as_ref().display());
    Ok(navigator_to_spec(&graph))
}

/// Load and compile a graph from a YAML file.
pub fn compile_yaml(path: impl AsRef<Path>) -> Result<CompiledGraph, GraphError> {
    load_yaml(path)?.compile()
}

/// Load and compile a graph from a native-schema JSON file.
pub fn compile_json(path: impl AsRef<Path>) -> Result<CompiledGraph, GraphError> {
    load_json(path)?.compile()
}

/// Load and compile a navigator benchmark file.
pub fn compile_navigator_json(path: impl AsRef<Path>) -> Result<CompiledGraph, GraphError> {
    load_navigator_json(path)?.compile()
}

/// Serialize and write a graph spec to YAML.
pub fn save_yaml(path: impl AsRef<Path>, spec: &GraphSpec) -> Result<(), GraphError> {
    let yaml = serde_yaml::to_string(spec)?;
    fs::write(path, yaml)?;
    Ok(())
}

/// Serialize and write a graph spec to pretty JSON.
pub fn save_json(path: impl AsRef<Path>, spec: &GraphSpec) -> Result<(), GraphError> {
    let json = serde_json::to_string_pretty(spec)?;
    fs::write(path, json)?;
    Ok(())
}

/// Serialize and write a policy report to pretty JSON.
pub fn save_report_json(path: impl AsRef<Path>, report: &PolicyReport) -> Result<(), GraphError> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}
