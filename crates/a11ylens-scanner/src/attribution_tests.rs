use a11ylens_protocols::{Impact, RawFinding, RawNode};

use super::*;

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn map_with(entries: &[(u64, &[&str])]) -> DomComponentMap {
    let mut map = DomComponentMap::default();
    for (id, path) in entries {
        map.insert(*id, strings(path));
    }
    map
}

fn node(target: &str, dom_node: Option<u64>) -> RawNode {
    RawNode {
        html: format!("<div id=\"{}\"></div>", target.trim_start_matches('#')),
        target: vec![target.to_string()],
        dom_node,
        ..Default::default()
    }
}

fn finding(id: &str, nodes: Vec<RawNode>) -> RawFinding {
    RawFinding {
        id: id.to_string(),
        impact: Some(Impact::Serious),
        description: "Ensures buttons have discernible text".to_string(),
        help: "Buttons must have discernible text".to_string(),
        help_url: "https://dequeuniversity.com/rules/axe/4.10/button-name".to_string(),
        tags: strings(&["cat.name-role-value", "wcag2a", "wcag412"]),
        nodes,
        details: None,
    }
}

#[test]
fn test_framework_segment_removed_from_user_path() {
    let map = map_with(&[(10, &["App", "ErrorBoundary", "Button"])]);
    let filter = FrameworkFilter::new(["ErrorBoundary"]).unwrap();
    let attributed = Attributor::new(&map, &filter)
        .attribute_violation(&finding("button-name", vec![node("#b", Some(10))]));

    let n = &attributed.nodes[0];
    assert_eq!(n.component.as_deref(), Some("Button"));
    assert_eq!(n.component_path, strings(&["App", "ErrorBoundary", "Button"]));
    assert_eq!(n.user_component_path, strings(&["App", "Button"]));
    assert!(!n.is_framework_component);
    assert_eq!(attributed.wcag_criteria, strings(&["4.1.2"]));
}

#[test]
fn test_node_without_component() {
    let map = map_with(&[(10, &["App"])]);
    let filter = FrameworkFilter::new(["ErrorBoundary"]).unwrap();
    let attributor = Attributor::new(&map, &filter);

    for raw in [node("#outside", Some(999)), node("#unresolved", None)] {
        let n = attributor.attribute_node(&raw);
        assert_eq!(n.component, None);
        assert!(n.component_path.is_empty());
        assert!(n.user_component_path.is_empty());
        assert!(!n.is_framework_component);
    }
}

#[test]
fn test_nearest_framework_component_flagged() {
    let map = map_with(&[(3, &["App", "ThemeProvider"])]);
    let filter = FrameworkFilter::new(["*Provider"]).unwrap();
    let n = Attributor::new(&map, &filter).attribute_node(&node("#x", Some(3)));

    assert_eq!(n.component.as_deref(), Some("ThemeProvider"));
    assert!(n.is_framework_component);
    assert_eq!(n.user_component_path, strings(&["App"]));
}

#[test]
fn test_all_framework_path_leaves_empty_user_path() {
    let map = map_with(&[(3, &["Router", "Outlet"])]);
    let filter = FrameworkFilter::new(["Router", "Outlet"]).unwrap();
    let n = Attributor::new(&map, &filter).attribute_node(&node("#x", Some(3)));
    assert!(n.user_component_path.is_empty());
    assert_eq!(n.component_path.len(), 2);
}

#[test]
fn test_light_attribution_dedups_targets() {
    let map = map_with(&[(1, &["App", "Nav"]), (2, &["App", "Footer"])]);
    let filter = FrameworkFilter::empty();
    let raw = finding(
        "color-contrast",
        vec![node("#a", Some(1)), node("#a", Some(1)), node("#c", Some(2)), node("#d", None)],
    );

    let light = Attributor::new(&map, &filter).attribute_light(&raw);

    assert_eq!(light.nodes.len(), 3);
    assert_eq!(light.nodes[0].component.as_deref(), Some("Nav"));
    assert_eq!(light.nodes[1].component.as_deref(), Some("Footer"));
    assert_eq!(light.nodes[2].component, None);
    assert_eq!(light.impact, Some(Impact::Serious));
}

#[test]
fn test_custom_findings_share_violation_pipeline() {
    let map = map_with(&[(5, &["App", "IconButton"])]);
    let filter = FrameworkFilter::empty();
    let mut custom = finding("target-size", vec![node("#icon", Some(5))]);
    custom.tags = strings(&["wcag22aa", "wcag258"]);
    custom.details = Some(serde_json::json!({"width": 16, "height": 16}));
    let axe = finding("button-name", vec![node("#b", None)]);

    let all = Attributor::new(&map, &filter).attribute_violations([&axe, &custom]);

    assert_eq!(all.len(), 2);
    assert_eq!(all[1].id, "target-size");
    assert_eq!(all[1].wcag_criteria, strings(&["2.5.8"]));
    assert_eq!(all[1].nodes[0].component.as_deref(), Some("IconButton"));
    assert!(all[1].details.is_some());
}
