//! Admin session gate
//!
//! A marker file next to the catalog keeps the panel unlocked across
//! launches. Credentials are fixed and compared in plain text; this gates
//! the editing surface as a convenience, nothing more.

use std::fs;
use std::path::PathBuf;

use super::data::{ADMIN_PASS, ADMIN_USER};

/// Marker file content that counts as an active session
const MARKER_ACTIVE: &str = "active";

/// Two-state gate: logged out or logged in, persisted as a marker file
pub struct Session {
    logged_in: bool,
    marker_path: PathBuf,
}

impl Session {
    /// Restore the session from the default marker location
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Restore the session from an explicit marker path.
    /// Presence of the marker (with the expected content) means logged in.
    pub fn load_from(marker_path: PathBuf) -> Self {
        let logged_in = fs::read_to_string(&marker_path)
            .map(|content| content.trim() == MARKER_ACTIVE)
            .unwrap_or(false);

        Session {
            logged_in,
            marker_path,
        }
    }

    fn default_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .expect("Could not determine user data directory");

        path.push("pedreiro-portfolio");
        path.push("session");
        path
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Attempt to unlock the panel.
    ///
    /// Succeeds only when both values match the fixed pair exactly; any
    /// mismatch changes nothing. A failed marker write is logged but does
    /// not block the session, it just will not survive a restart.
    pub fn login(&mut self, user: &str, pass: &str) -> bool {
        if user != ADMIN_USER || pass != ADMIN_PASS {
            return false;
        }

        self.logged_in = true;
        if let Err(e) = self.persist_marker() {
            eprintln!("⚠️  Could not persist the session marker: {}", e);
        }
        true
    }

    /// Lock the panel again and clear the persisted marker
    pub fn logout(&mut self) {
        self.logged_in = false;

        if self.marker_path.exists() {
            if let Err(e) = fs::remove_file(&self.marker_path) {
                eprintln!("⚠️  Could not remove the session marker: {}", e);
            }
        }
    }

    fn persist_marker(&self) -> std::io::Result<()> {
        if let Some(parent) = self.marker_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.marker_path, MARKER_ACTIVE)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.logged_in)
            .field("marker_path", &self.marker_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_session() -> (TempDir, Session) {
        let dir = TempDir::new().unwrap();
        let session = Session::load_from(dir.path().join("session"));
        (dir, session)
    }

    #[test]
    fn starts_logged_out_without_marker() {
        let (_dir, session) = temp_session();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn correct_credentials_log_in_and_persist() {
        let (dir, mut session) = temp_session();

        assert!(session.login(ADMIN_USER, ADMIN_PASS));
        assert!(session.is_logged_in());

        // A fresh load sees the marker and restores the session
        let restored = Session::load_from(dir.path().join("session"));
        assert!(restored.is_logged_in());
    }

    #[test]
    fn any_mismatch_stays_logged_out() {
        let (dir, mut session) = temp_session();

        assert!(!session.login("wrong", ADMIN_PASS));
        assert!(!session.login(ADMIN_USER, "wrong"));
        assert!(!session.login("", ""));
        assert!(!session.is_logged_in());

        let restored = Session::load_from(dir.path().join("session"));
        assert!(!restored.is_logged_in());
    }

    #[test]
    fn logout_clears_the_marker() {
        let (dir, mut session) = temp_session();

        session.login(ADMIN_USER, ADMIN_PASS);
        session.logout();
        assert!(!session.is_logged_in());

        let restored = Session::load_from(dir.path().join("session"));
        assert!(!restored.is_logged_in());
    }

    #[test]
    fn unexpected_marker_content_does_not_unlock() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session");
        fs::write(&path, "stale-or-tampered").unwrap();

        let session = Session::load_from(path);
        assert!(!session.is_logged_in());
    }
}
