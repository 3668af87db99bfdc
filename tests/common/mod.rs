//! Shared fixtures for CLI integration tests.
//!
//! Every command runs with its config directory pointed into the test's temp
//! dir and a plain ASCII locale, so output does not depend on the machine.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

/// Inventory with plans in nested folders, an unfiled plan, a schedule, two
/// 3D views, an elevation facing south and a template.
pub const INVENTORY: &str = r#"{
  "organization": { "sort_order": "ascending" },
  "views": [
    {
      "id": 1,
      "name": "Level 1",
      "kind": "floor_plan",
      "folders": ["Floor Plans", "Arch"],
      "crop": {
        "region": { "min": { "x": 0.0, "y": 0.0, "z": 0.0 }, "max": { "x": 40.0, "y": 30.0, "z": 10.0 } },
        "active": true,
        "visible": true,
        "annotation_crop_active": true,
        "annotation_offsets": { "top": 2.0, "bottom": 2.0, "left": 1.0, "right": 1.0 }
      }
    },
    { "id": 2, "name": "Level 2", "kind": "floor_plan", "folders": ["Floor Plans", "Arch"] },
    {
      "id": 3,
      "name": "Level 10",
      "kind": "floor_plan",
      "folders": ["Floor Plans", "Arch"],
      "crop": { "annotation_offsets": { "top": 0.0, "bottom": 0.0, "left": 0.0, "right": 0.0 } }
    },
    {
      "id": 4,
      "name": "Level 1 Lighting",
      "kind": "ceiling_plan",
      "folders": ["Floor Plans", "MEP"],
      "direction": { "x": 0.0, "y": 0.0, "z": -1.0 }
    },
    { "id": 5, "name": "Site", "kind": "floor_plan" },
    { "id": 6, "name": "Door Schedule", "kind": "schedule" },
    {
      "id": 7,
      "name": "{3D}",
      "kind": "three_d",
      "direction": { "x": 1.0, "y": 1.0, "z": 1.0 },
      "crop": {
        "region": { "min": { "x": -5.0, "y": -5.0, "z": -5.0 }, "max": { "x": 5.0, "y": 5.0, "z": 5.0 } }
      },
      "section_box": { "min": { "x": -1.0, "y": -1.0, "z": -1.0 }, "max": { "x": 1.0, "y": 1.0, "z": 1.0 } }
    },
    {
      "id": 8,
      "name": "Axo",
      "kind": "three_d",
      "folders": ["3D Views"],
      "direction": { "x": -1.0, "y": 1.0, "z": 1.0 }
    },
    {
      "id": 9,
      "name": "South",
      "kind": "elevation",
      "direction": { "x": 0.0, "y": -1.0, "z": 0.0 }
    },
    { "id": 10, "name": "Plan Template", "kind": "floor_plan", "is_template": true }
  ]
}
"#;

/// Temp dir holding `views.json` and an isolated config home
pub struct Fixture {
    pub dir: tempfile::TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("views.json"), INVENTORY).unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        Self { dir }
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.dir.path().join("views.json")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Path of the user config the binary will look for
    pub fn user_config_path(&self) -> PathBuf {
        self.dir.path().join("config/croptree/config.toml")
    }

    pub fn write_user_config(&self, content: &str) {
        let path = self.user_config_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// `croptree` with an isolated environment and the inventory already
    /// passed after `subcommand`
    pub fn command(&self, subcommand: &str) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_croptree"));
        cmd.current_dir(self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("HOME", self.dir.path())
            .env("LC_ALL", "C")
            .env("TERM", "dumb")
            .env("NO_COLOR", "1")
            .env_remove("CROPTREE_COPY_CROP_VISIBILITY")
            .env_remove("CROPTREE_COPY_SECTION_BOX")
            .env_remove("CROPTREE_SEARCH_MODE")
            .arg(subcommand)
            .arg("--inventory")
            .arg(self.inventory_path());
        cmd
    }

    pub fn read_inventory(&self, path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Parse NDJSON stdout into events
pub fn events(output: &Output) -> Vec<Value> {
    stdout(output)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// The view with `id` from a parsed inventory
pub fn view(inventory: &Value, id: u64) -> &Value {
    inventory["views"]
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["id"] == id)
        .unwrap()
}
