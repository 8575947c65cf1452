//! Integration tests for the style registry.

use templ_css::{Declaration, StyleRegistry};

#[test]
fn test_empty_registry_renders_nothing() {
    let registry = StyleRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.render(), "");
}

#[test]
fn test_register_rule_is_verbatim() {
    let mut registry = StyleRegistry::new();
    registry.register_rule("h1", vec![Declaration::new("font-size", "large")]);
    assert_eq!(registry.render(), "h1{font-size:large}");
}

#[test]
fn test_declarations_joined_without_trailing_semicolon() {
    let mut registry = StyleRegistry::new();
    registry.register_rule(
        ".name",
        vec![
            Declaration::new("color", "red"),
            Declaration::new("background-color", "#ff6347"),
        ],
    );
    assert_eq!(registry.render(), ".name{color:red;background-color:#ff6347}");
}

#[test]
fn test_register_class_adds_missing_dot() {
    let mut registry = StyleRegistry::new();
    registry.register_class("button", vec![Declaration::new("color", "black")]);
    registry.register_class(".link", vec![Declaration::new("color", "blue")]);
    assert_eq!(
        registry.render(),
        ".button{color:black}.link{color:blue}"
    );
}

#[test]
fn test_rules_render_in_registration_order() {
    let mut registry = StyleRegistry::new();
    registry.register_rule("b", vec![Declaration::new("margin", "0")]);
    registry.register_rule("a", vec![Declaration::new("margin", "0")]);
    assert_eq!(registry.render(), "b{margin:0}a{margin:0}");
}

#[test]
fn test_create_scoped_class_embeds_registry_size() {
    let mut registry = StyleRegistry::new();
    let first = registry.create_scoped_class("component", vec![Declaration::new("color", "white")]);
    assert_eq!(first.as_str(), "component_0");
    assert_eq!(registry.render(), ".component_0{color:white}");
}

#[test]
fn test_scoped_class_ids_are_unique_per_run() {
    let mut registry = StyleRegistry::new();
    let first = registry.create_scoped_class("component", vec![]);
    let second = registry.create_scoped_class("component", vec![]);
    assert_ne!(first, second);
    assert_eq!(first.as_str(), "component_0");
    assert_eq!(second.as_str(), "component_1");
}

#[test]
fn test_scoped_class_id_counts_all_rules() {
    let mut registry = StyleRegistry::new();
    registry.register_rule("h1", vec![]);
    registry.register_class("name", vec![]);
    let id = registry.create_scoped_class("component", vec![]);
    assert_eq!(id.as_str(), "component_2");
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_no_deduplication_or_merging() {
    let mut registry = StyleRegistry::new();
    registry.register_rule("h1", vec![Declaration::new("color", "red")]);
    registry.register_rule("h1", vec![Declaration::new("color", "red")]);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.render(), "h1{color:red}h1{color:red}");
}

#[test]
fn test_rules_are_exposed_in_order() {
    let mut registry = StyleRegistry::new();
    registry.register_rule("h1", vec![]);
    registry.register_class("name", vec![]);
    let selectors: Vec<&str> = registry
        .rules()
        .iter()
        .map(|rule| rule.selector.as_str())
        .collect();
    assert_eq!(selectors, vec!["h1", ".name"]);
}
