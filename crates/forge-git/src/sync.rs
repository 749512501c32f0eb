//! Pushing the satellite's primary branch into the bare store

use std::cell::RefCell;

use git2::{ErrorCode, Oid, PushOptions, Remote, RemoteCallbacks, Repository};

use crate::{BARE_REMOTE, Error, ProjectLayout, Result};

/// What a push to the bare store did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The satellite has no commits on the primary branch
    NothingToSync,
    /// The bare store already points at the satellite's tip
    UpToDate { tip: Oid },
    /// The bare store was advanced from `previous` to `tip`
    Pushed { previous: Option<Oid>, tip: Oid },
}

/// Find the satellite's `bare` remote, creating it if it does not exist yet.
///
/// An existing remote is reused as configured.
pub fn ensure_bare_remote<'r>(
    satellite: &'r Repository,
    layout: &ProjectLayout,
) -> Result<Remote<'r>> {
    match satellite.find_remote(BARE_REMOTE) {
        Ok(remote) => Ok(remote),
        Err(e) if e.code() == ErrorCode::NotFound => {
            let url = layout.bare_path().as_str();
            tracing::debug!(remote = BARE_REMOTE, url, "Creating satellite remote");
            Ok(satellite.remote(BARE_REMOTE, url)?)
        }
        Err(e) => Err(e.into()),
    }
}

/// Push the satellite's `primary_branch` into the bare store.
///
/// Never forces: a bare store that is not an ancestor of the satellite's
/// tip yields [`Error::PushRejected`].
pub fn push_to_bare(layout: &ProjectLayout, primary_branch: &str) -> Result<SyncOutcome> {
    let satellite = Repository::open(layout.satellite_path().to_native())
        .map_err(|e| Error::unavailable(layout.satellite_path().to_native(), e.message()))?;
    let bare = Repository::open_bare(layout.bare_path().to_native())
        .map_err(|e| Error::unavailable(layout.bare_path().to_native(), e.message()))?;

    push_branch(&satellite, &bare, layout, primary_branch)
}

pub(crate) fn push_branch(
    satellite: &Repository,
    bare: &Repository,
    layout: &ProjectLayout,
    branch: &str,
) -> Result<SyncOutcome> {
    let refname = format!("refs/heads/{branch}");
    let mut remote = ensure_bare_remote(satellite, layout)?;

    let tip = match satellite.refname_to_id(&refname) {
        Ok(oid) => oid,
        Err(e) if e.code() == ErrorCode::NotFound => {
            tracing::debug!(refname = %refname, "Satellite has no commits to sync");
            return Ok(SyncOutcome::NothingToSync);
        }
        Err(e) => return Err(e.into()),
    };

    let previous = match bare.refname_to_id(&refname) {
        Ok(oid) => Some(oid),
        Err(e) if e.code() == ErrorCode::NotFound => None,
        Err(e) => return Err(e.into()),
    };

    if previous == Some(tip) {
        return Ok(SyncOutcome::UpToDate { tip });
    }

    if let Some(prev) = previous {
        let fast_forward =
            satellite.find_commit(prev).is_ok() && satellite.graph_descendant_of(tip, prev)?;
        if !fast_forward {
            return Err(Error::PushRejected {
                refname,
                message: format!(
                    "non-fast-forward: bare store is at {prev}, satellite is at {tip}"
                ),
            });
        }
    }

    let rejection: RefCell<Option<String>> = RefCell::new(None);
    {
        let mut callbacks = RemoteCallbacks::new();
        callbacks.push_update_reference(|_name, status| {
            if let Some(msg) = status {
                *rejection.borrow_mut() = Some(msg.to_string());
            }
            Ok(())
        });
        let mut options = PushOptions::new();
        options.remote_callbacks(callbacks);

        let refspec = format!("{refname}:{refname}");
        remote
            .push(&[refspec.as_str()], Some(&mut options))
            .map_err(|e| Error::PushRejected {
                refname: refname.clone(),
                message: e.message().to_string(),
            })?;
    }

    if let Some(message) = rejection.into_inner() {
        return Err(Error::PushRejected { refname, message });
    }

    tracing::info!(
        refname = %refname,
        previous = ?previous,
        tip = %tip,
        "Pushed satellite to bare store"
    );
    Ok(SyncOutcome::Pushed { previous, tip })
}
