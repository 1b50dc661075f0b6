//! # Printer Discovery
//!
//! Finds printer device nodes so callers can pick one by name. Discovery is
//! a convenience around the encoder; a session only ever sees an already
//! resolved channel.
//!
//! ## Scanned Locations
//!
//! | Pattern | Kind |
//! |---------|------|
//! | `/dev/usb/lp*` | USB printer class |
//! | `/dev/lp*` | Parallel port |
//! | `/dev/ttyUSB*` | USB-serial adapter |
//! | `/dev/ttyS*` | On-board serial port |

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

/// Default device directory
pub const DEV_ROOT: &str = "/dev";

/// Kind of printer device node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// USB printer class device (`usb/lpN`)
    Usb,
    /// Parallel port (`lpN`)
    Parallel,
    /// Serial port (`ttyUSBN`, `ttySN`)
    Serial,
    /// Explicit path that matched no known pattern
    Other,
}

/// A discovered printer device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// Device file name (e.g. `lp0`)
    pub name: String,
    /// Full path
    pub path: PathBuf,
    /// Device kind
    pub kind: DeviceKind,
}

/// List printer device nodes under `/dev`.
pub fn discover() -> io::Result<Vec<DeviceInfo>> {
    discover_in(Path::new(DEV_ROOT))
}

/// List printer device nodes under `root`, sorted by path.
///
/// A missing `root/usb` directory is not an error.
pub fn discover_in(root: &Path) -> io::Result<Vec<DeviceInfo>> {
    let mut found = Vec::new();

    scan(&root.join("usb"), "lp", DeviceKind::Usb, &mut found)?;
    scan(root, "lp", DeviceKind::Parallel, &mut found)?;
    scan(root, "ttyUSB", DeviceKind::Serial, &mut found)?;
    scan(root, "ttyS", DeviceKind::Serial, &mut found)?;

    found.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(root = %root.display(), count = found.len(), "device scan complete");
    Ok(found)
}

fn scan(dir: &Path, prefix: &str, kind: DeviceKind, found: &mut Vec<DeviceInfo>) -> io::Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_numbered(&name, prefix) {
            found.push(DeviceInfo {
                path: entry.path(),
                name,
                kind,
            });
        }
    }
    Ok(())
}

/// `lp0`, `lp12` match prefix `lp`; `lp`, `lpx`, `lpr` do not.
fn is_numbered(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Resolve a printer by name under `/dev`.
///
/// See [`find_device_in`].
pub fn find_device(name: &str) -> io::Result<Option<DeviceInfo>> {
    find_device_in(Path::new(DEV_ROOT), name)
}

/// Resolve a printer by name.
///
/// An existing path is returned as-is. Otherwise `name` is compared,
/// case-insensitively, to the file names of the discovered devices.
pub fn find_device_in(root: &Path, name: &str) -> io::Result<Option<DeviceInfo>> {
    let path = Path::new(name);
    if path.components().count() > 1 && path.exists() {
        let found = discover_in(root)?
            .into_iter()
            .find(|d| d.path == path);
        return Ok(Some(found.unwrap_or_else(|| DeviceInfo {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| name.to_string()),
            path: path.to_path_buf(),
            kind: DeviceKind::Other,
        })));
    }

    Ok(discover_in(root)?
        .into_iter()
        .find(|d| d.name.eq_ignore_ascii_case(name)))
}
