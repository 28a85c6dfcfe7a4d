//! Transport tuning capability
//!
//! One setter/getter pair per option family so option application and
//! read-back can run against any backend. The OS backend is `socket2::Socket`;
//! tests substitute an in-memory tuner.

use std::io;
use std::time::Duration;

use socket2::{Socket, TcpKeepalive};

use crate::config::{KeepaliveTiming, Linger};

pub trait TransportTuner {
    fn set_keepalive(&self, enabled: bool) -> io::Result<()>;
    fn keepalive(&self) -> io::Result<bool>;

    /// Also switches keepalive on.
    fn set_keepalive_timing(&self, timing: KeepaliveTiming) -> io::Result<()>;

    fn set_nodelay(&self, enabled: bool) -> io::Result<()>;
    fn nodelay(&self) -> io::Result<bool>;

    fn set_max_segment(&self, bytes: u32) -> io::Result<()>;
    fn max_segment(&self) -> io::Result<u32>;

    /// `None` blocks indefinitely.
    fn set_send_timeout(&self, timeout: Option<Duration>) -> io::Result<()>;
    /// `None` blocks indefinitely.
    fn set_recv_timeout(&self, timeout: Option<Duration>) -> io::Result<()>;

    fn set_send_buffer(&self, bytes: usize) -> io::Result<()>;
    fn send_buffer(&self) -> io::Result<usize>;

    fn set_recv_buffer(&self, bytes: usize) -> io::Result<()>;
    fn recv_buffer(&self) -> io::Result<usize>;

    fn set_linger(&self, linger: Linger) -> io::Result<()>;
    fn linger(&self) -> io::Result<Linger>;

    fn set_max_retransmit(&self, limit: Duration) -> io::Result<()>;
    fn max_retransmit(&self) -> io::Result<Option<Duration>>;
}

impl TransportTuner for Socket {
    fn set_keepalive(&self, enabled: bool) -> io::Result<()> {
        Socket::set_keepalive(self, enabled)
    }

    fn keepalive(&self) -> io::Result<bool> {
        Socket::keepalive(self)
    }

    fn set_keepalive_timing(&self, timing: KeepaliveTiming) -> io::Result<()> {
        let params = TcpKeepalive::new()
            .with_time(timing.time())
            .with_interval(timing.interval());
        self.set_tcp_keepalive(&params)
    }

    fn set_nodelay(&self, enabled: bool) -> io::Result<()> {
        self.set_tcp_nodelay(enabled)
    }

    fn nodelay(&self) -> io::Result<bool> {
        self.tcp_nodelay()
    }

    #[cfg(all(unix, not(target_os = "redox")))]
    fn set_max_segment(&self, bytes: u32) -> io::Result<()> {
        self.set_tcp_mss(bytes)
    }

    #[cfg(not(all(unix, not(target_os = "redox"))))]
    fn set_max_segment(&self, _bytes: u32) -> io::Result<()> {
        Err(unsupported("TCP_MAXSEG"))
    }

    #[cfg(all(unix, not(target_os = "redox")))]
    fn max_segment(&self) -> io::Result<u32> {
        self.tcp_mss()
    }

    #[cfg(not(all(unix, not(target_os = "redox"))))]
    fn max_segment(&self) -> io::Result<u32> {
        Err(unsupported("TCP_MAXSEG"))
    }

    fn set_send_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        self.set_write_timeout(timeout)
    }

    fn set_recv_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        self.set_read_timeout(timeout)
    }

    fn set_send_buffer(&self, bytes: usize) -> io::Result<()> {
        self.set_send_buffer_size(bytes)
    }

    fn send_buffer(&self) -> io::Result<usize> {
        self.send_buffer_size()
    }

    fn set_recv_buffer(&self, bytes: usize) -> io::Result<()> {
        self.set_recv_buffer_size(bytes)
    }

    fn recv_buffer(&self) -> io::Result<usize> {
        self.recv_buffer_size()
    }

    fn set_linger(&self, linger: Linger) -> io::Result<()> {
        Socket::set_linger(self, linger.as_duration())
    }

    fn linger(&self) -> io::Result<Linger> {
        Socket::linger(self).map(Linger::from_duration)
    }

    // TCP_USER_TIMEOUT bounds how long sent data may stay unacknowledged,
    // the closest Linux analogue of a maximum retransmission time.
    #[cfg(any(target_os = "android", target_os = "fuchsia", target_os = "linux"))]
    fn set_max_retransmit(&self, limit: Duration) -> io::Result<()> {
        self.set_tcp_user_timeout(Some(limit))
    }

    #[cfg(not(any(target_os = "android", target_os = "fuchsia", target_os = "linux")))]
    fn set_max_retransmit(&self, _limit: Duration) -> io::Result<()> {
        Err(unsupported("TCP_MAXRT"))
    }

    #[cfg(any(target_os = "android", target_os = "fuchsia", target_os = "linux"))]
    fn max_retransmit(&self) -> io::Result<Option<Duration>> {
        self.tcp_user_timeout()
    }

    #[cfg(not(any(target_os = "android", target_os = "fuchsia", target_os = "linux")))]
    fn max_retransmit(&self) -> io::Result<Option<Duration>> {
        Err(unsupported("TCP_MAXRT"))
    }
}

#[allow(dead_code)]
fn unsupported(option: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        format!("{option} is not available on this platform"),
    )
}
