use crate::roster::ConfigurationError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// SinfulAddress is a peer address exactly as it was written in configuration, parsed but not
/// yet resolved. Accepted forms are `host:port`, `<host:port>` and `<host:port?sock=name>`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SinfulAddress {
    host: String,
    port: u16,
    shared_port_id: Option<String>,
}

impl SinfulAddress {
    pub(crate) fn parse(raw: &str) -> Result<Self, ConfigurationError> {
        let invalid = |reason: &str| ConfigurationError::InvalidAddress {
            address: raw.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = raw.trim();
        let inner = match (trimmed.starts_with('<'), trimmed.ends_with('>')) {
            (true, true) => &trimmed[1..trimmed.len() - 1],
            (false, false) => trimmed,
            _ => return Err(invalid("unbalanced '<' '>'")),
        };

        let (host_port, params) = match inner.split_once('?') {
            Some((host_port, params)) => (host_port, Some(params)),
            None => (inner, None),
        };

        let (host, port) = if let Some(rest) = host_port.strip_prefix('[') {
            // [v6]:port
            let (host, port) = rest.split_once("]:").ok_or_else(|| invalid("malformed IPv6 literal"))?;
            (host, port)
        } else {
            host_port.rsplit_once(':').ok_or_else(|| invalid("missing port"))?
        };

        if host.is_empty() {
            return Err(invalid("missing host"));
        }
        let port: u16 = port.parse().map_err(|_| invalid("port is not a number"))?;
        if port == 0 {
            return Err(invalid("port must be non-zero"));
        }

        let mut shared_port_id = None;
        if let Some(params) = params {
            for param in params.split('&').filter(|p| !p.is_empty()) {
                match param.split_once('=') {
                    Some(("sock", id)) if !id.is_empty() => shared_port_id = Some(id.to_string()),
                    Some(("sock", _)) => return Err(invalid("empty sock parameter")),
                    // Other sinful parameters (alias, addrs, ...) don't affect identity.
                    _ => {}
                }
            }
        }

        Ok(SinfulAddress {
            host: host.to_string(),
            port,
            shared_port_id,
        })
    }

    /// Resolve without touching DNS. Only succeeds when the host is an IP literal.
    pub(crate) fn resolve_literal(&self) -> Option<PeerAddress> {
        let ip: IpAddr = self.host.parse().ok()?;
        Some(PeerAddress {
            socket_addr: SocketAddr::new(ip, self.port),
            shared_port_id: self.shared_port_id.clone(),
        })
    }

    pub(crate) async fn resolve(&self) -> Result<PeerAddress, ConfigurationError> {
        if let Some(literal) = self.resolve_literal() {
            return Ok(literal);
        }

        let candidates: Vec<SocketAddr> = tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| ConfigurationError::InvalidAddress {
                address: self.to_string(),
                reason: format!("host lookup failed: {}", e),
            })?
            .collect();

        // Prefer IPv4 so that every peer computes the same canonical form for a dual-stack name.
        let socket_addr = candidates
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| candidates.first())
            .copied()
            .ok_or_else(|| ConfigurationError::InvalidAddress {
                address: self.to_string(),
                reason: "host resolved to no addresses".to_string(),
            })?;

        Ok(PeerAddress {
            socket_addr,
            shared_port_id: self.shared_port_id.clone(),
        })
    }
}

impl fmt::Display for SinfulAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}:{}", self.host, self.port)?;
        if let Some(id) = &self.shared_port_id {
            write!(f, "?sock={}", id)?;
        }
        write!(f, ">")
    }
}

/// PeerAddress is a resolved, canonical endpoint. Two PeerAddresses are equal iff they name the
/// same socket and the same shared-port sub-channel, regardless of how they were spelled.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PeerAddress {
    socket_addr: SocketAddr,
    shared_port_id: Option<String>,
}

impl PeerAddress {
    pub fn new(socket_addr: SocketAddr, shared_port_id: Option<String>) -> Self {
        PeerAddress {
            socket_addr,
            shared_port_id,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.socket_addr
    }

    pub fn shared_port_id(&self) -> Option<&str> {
        self.shared_port_id.as_deref()
    }

    /// `points_to()` answers "is `self` (a configured address) the endpoint `me` is listening on".
    pub(crate) fn points_to(&self, me: &PeerAddress) -> bool {
        if self.socket_addr.port() != me.socket_addr.port() || self.shared_port_id != me.shared_port_id {
            return false;
        }

        self.same_host(me)
    }

    /// `same_host()` is true when `self` is reachable on the host `me` is listening on.
    pub(crate) fn same_host(&self, me: &PeerAddress) -> bool {
        let mine = me.socket_addr.ip();
        let theirs = self.socket_addr.ip();
        if mine == theirs {
            return true;
        }

        // Listening on the wildcard address. We can only vouch for loopback.
        mine.is_unspecified() && (theirs.is_loopback() || theirs.is_unspecified())
    }

    pub(crate) fn grpc_url(&self) -> String {
        format!("http://{}", self.socket_addr)
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shared_port_id {
            None => write!(f, "<{}>", self.socket_addr),
            Some(id) => write!(f, "<{}?sock={}>", self.socket_addr, id),
        }
    }
}
