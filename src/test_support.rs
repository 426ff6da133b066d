use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// `stencil.yaml` for the demo project used across tests.
pub(crate) const DEMO_CONFIG: &str = "\
modname: hello-world
username: octocat
short_desc: Says hello to the world.
";

/// A temp dir holding a minimal project: `stencil.yaml` and a README with
/// empty managed regions.
pub(crate) fn create_demo_project() -> TempDir {
    create_project_with_config(DEMO_CONFIG)
}

pub(crate) fn create_project_with_config(config: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    std::fs::write(path.join("stencil.yaml"), config).unwrap();
    std::fs::write(
        path.join("README.rst"),
        "hello-world\n===========\n\n\
         .. start shields\n.. end shields\n\n\
         .. start short_desc\n.. end short_desc\n\n\
         .. start installation\n.. end installation\n",
    )
    .unwrap();

    temp_dir
}
