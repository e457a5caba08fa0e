use std::{
    net::{SocketAddr, TcpStream, ToSocketAddrs},
    time::Duration,
};

use tauri::AppHandle;
use url::Url;

use crate::with_coordinator_on_main;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Reachable,
    Unreachable,
}

const MIN_PROBE_TIMEOUT: Duration = Duration::from_millis(50);

fn probe_target(start_url: &str) -> Option<(String, u16)> {
    let parsed = Url::parse(start_url).ok()?;
    let host = parsed.host_str()?.to_string();
    let port = parsed.port_or_known_default().unwrap_or(443);
    Some((host, port))
}

fn any_connects(addrs: &[SocketAddr], timeout: Duration) -> bool {
    addrs
        .iter()
        .any(|address| TcpStream::connect_timeout(address, timeout).is_ok())
}

/// TCP reachability of the start URL's host. DNS failure counts as unreachable.
pub fn probe_start_url(start_url: &str, timeout: Duration) -> Reachability {
    let Some((host, port)) = probe_target(start_url) else {
        return Reachability::Unreachable;
    };
    let timeout = timeout.max(MIN_PROBE_TIMEOUT);

    let addrs = match (host.as_str(), port).to_socket_addrs() {
        Ok(addrs) => addrs.collect::<Vec<_>>(),
        Err(error) => {
            tracing::warn!(%host, "failed to resolve start url host: {error}");
            return Reachability::Unreachable;
        }
    };

    if any_connects(&addrs, timeout) {
        Reachability::Reachable
    } else {
        Reachability::Unreachable
    }
}

/// Probes in the background; an unreachable site is reported as a main-frame load
/// failure. Runs at startup and after every reload.
pub fn spawn_reachability_probe(app_handle: AppHandle, start_url: String, timeout: Duration) {
    tauri::async_runtime::spawn_blocking(move || {
        let reachability = probe_start_url(&start_url, timeout);
        tracing::info!(?reachability, "start url probe finished");
        if reachability == Reachability::Unreachable {
            with_coordinator_on_main(&app_handle, |coordinator| {
                coordinator.on_main_load_failed(true)
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn probe_target_uses_scheme_default_port() {
        assert_eq!(
            probe_target("https://modernforextrading.com/tmft-community/"),
            Some(("modernforextrading.com".to_string(), 443))
        );
        assert_eq!(
            probe_target("http://127.0.0.1:8080/app/"),
            Some(("127.0.0.1".to_string(), 8080))
        );
        assert_eq!(probe_target("not a url"), None);
    }

    #[test]
    fn probe_reports_listening_local_port_as_reachable() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
        let port = listener.local_addr().expect("local addr").port();

        let reachability = probe_start_url(&format!("http://127.0.0.1:{port}/"), Duration::from_millis(500));
        assert_eq!(reachability, Reachability::Reachable);
    }

    #[test]
    fn probe_reports_closed_port_as_unreachable() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
            listener.local_addr().expect("local addr").port()
        };

        let reachability = probe_start_url(&format!("http://127.0.0.1:{port}/"), Duration::from_millis(200));
        assert_eq!(reachability, Reachability::Unreachable);
    }

    #[test]
    fn probe_rejects_unparseable_url() {
        assert_eq!(probe_start_url("::::", Duration::ZERO), Reachability::Unreachable);
    }
}
