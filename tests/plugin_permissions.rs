use std::fs;
use std::path::Path;

fn manifest_file(name: &str) -> String {
    fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join(name)).unwrap()
}

/// Command names listed in the build script's `COMMANDS` table
fn build_script_commands() -> Vec<String> {
    let script = manifest_file("build.rs");
    let start = script.find("COMMANDS: &[&str] = &[").unwrap();
    let end = start + script[start..].find("];").unwrap();
    script[start..end]
        .split('"')
        .skip(1)
        .step_by(2)
        .map(str::to_string)
        .collect()
}

#[test]
fn default_permission_allows_every_plugin_command() {
    let commands = build_script_commands();
    assert_eq!(commands.len(), 15);

    let default: toml::Value = toml::from_str(&manifest_file("permissions/default.toml")).unwrap();
    let granted: Vec<&str> = default["default"]["permissions"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p.as_str())
        .collect();

    for command in &commands {
        let permission = format!("allow-{}", command.replace('_', "-"));
        assert!(granted.contains(&permission.as_str()), "missing {}", permission);
    }
    assert_eq!(granted.len(), commands.len());
}

#[test]
fn plugin_name_matches_links_key() {
    let manifest: toml::Value = toml::from_str(&manifest_file("Cargo.toml")).unwrap();
    let links = manifest["package"]["links"].as_str().unwrap();

    let commands = manifest_file("src/commands.rs");
    assert!(commands.contains(&format!("Builder::new(\"{}\")", links)));

    for command in build_script_commands() {
        assert!(commands.contains(&format!("fn {}", command)), "no handler for {}", command);
    }
}
