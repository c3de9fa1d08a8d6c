//! Test utilities: temporary git repositories and a sample component file.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Components loaded lazily by [`sample_app`]: (binding, module path, export).
pub const SAMPLE_LAZY_COMPONENTS: &[(&str, &str, &str)] = &[
    ("EstimateManager", "./components/EstimateManager", "EstimateManager"),
    ("TemplatesManager", "./components/Templates", "TemplatesManager"),
    ("ChecklistsManager", "./components/Checklists", "ChecklistsManager"),
    ("StaffManager", "./components/StaffManager", "StaffManager"),
    ("GoalsManager", "./components/GoalsManager", "GoalsManager"),
    ("PDFSettings", "./components/PDFSettings", "PDFSettings"),
    ("EventCalendar", "./components/EventCalendar", "EventCalendar"),
    ("Analytics", "./components/Analytics", "Analytics"),
    ("CustomersManager", "./components/CustomersManager", "CustomersManager"),
    ("AdminPanel", "./components/AdminPanel", "AdminPanel"),
    ("AccessDenied", "./components/AccessDenied", "AccessDenied"),
];

/// A React entry component whose screens are loaded with `lazy`.
///
/// `AccessDenied` is additionally imported eagerly right above `App`, so a
/// rewrite produces a duplicate that has to be removed.
pub fn sample_app() -> String {
    let mut text = String::from(
        "import { useState, useEffect, lazy, Suspense } from 'react';\n\
import { Menu, X } from 'lucide-react';\n\
import { useAuth } from './hooks/useAuth';\n\
import { useEquipment } from './hooks/useEquipment';\n\
import { Auth } from './components/Auth';\n\
import { EquipmentManager } from './components/EquipmentManagement';\n\
import { Button } from './components/ui/button';\n\
import {\n\
  Package,\n\
  FileText,\n\
  Settings\n\
} from 'lucide-react';\n\
import type { PDFSettings as PDFSettingsType } from './types';\n\
// Lazy loading for heavy components\n",
    );
    for (binding, module, export) in SAMPLE_LAZY_COMPONENTS {
        text.push_str(&format!(
            "const {} = lazy(() => import('{}').then(m => ({{ default: m.{} }})));\n",
            binding, module, export
        ));
    }
    text.push_str(
        "\n\
type Tab = 'equipment' | 'estimates' | 'settings';\n\
\n\
import { AccessDenied } from './components/AccessDenied';\n\
\n\
function App() {\n\
  const { user, loading } = useAuth();\n\
  const [activeTab, setActiveTab] = useState<Tab>('equipment');\n\
\n\
  useEffect(() => {\n\
    document.title = 'Склад';\n\
  }, []);\n\
\n\
  if (loading) {\n\
    return <div className=\"flex h-screen\">Загрузка...</div>;\n\
  }\n\
\n\
  if (!user) {\n\
    return <Auth />;\n\
  }\n\
\n\
  return (\n\
    <Suspense fallback={<div>...</div>}>\n\
      {activeTab === 'estimates' && <EstimateManager />}\n\
      {activeTab === 'settings' && <PDFSettings />}\n\
      <AccessDenied />\n\
    </Suspense>\n\
  );\n\
}\n\
\n\
export default App;\n",
    );
    text
}

/// A temporary git repository for testing.
///
/// The repository is automatically cleaned up when dropped.
pub struct TestRepo {
    dir: TempDir,
    git_initialized: bool,
}

impl TestRepo {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            dir,
            git_initialized: false,
        }
    }

    /// Create a new temporary directory with git initialized.
    pub fn with_git() -> Self {
        let mut repo = Self::new();
        repo.init_git();
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Initialize a git repository and configure a committer identity.
    pub fn init_git(&mut self) {
        for args in [
            &["init"][..],
            &["config", "user.email", "test@test.com"],
            &["config", "user.name", "Test"],
            &["config", "commit.gpgsign", "false"],
        ] {
            self.git(args);
        }
        self.git_initialized = true;
    }

    /// Write a file and stage it if git is initialized.
    ///
    /// Creates parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.add_untracked(path, content);
        if self.git_initialized {
            self.git(&["add", path]);
        }
        full_path
    }

    /// Write a file without staging it.
    pub fn add_untracked(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create a commit with the given message.
    pub fn commit(&self, message: &str) {
        assert!(self.git_initialized, "Git not initialized");
        self.git(&["commit", "-m", message, "--allow-empty"]);
    }

    fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
