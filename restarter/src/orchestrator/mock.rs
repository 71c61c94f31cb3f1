//! Scripted console and status fakes that record what the orchestrator does

use crate::capability::{Console, ConsoleConnector, StatusSource};
use crate::config::{Commands, Config, Timings};
use remote::{
    ConsoleError, ServerDescription, ServerPlayers, ServerVersion, StatusError, StatusResponse,
};
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

pub fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 25565,
        server_rcon_port: 25575,
        server_rcon_password: "secret".to_string(),
        restart_reminder_time: 2,
        dont_restart_if_players: false,
        player_threshold: 20,
        commands: Commands::default(),
        timings: Timings::default(),
    }
}

pub fn status_with(online: u32) -> StatusResponse {
    StatusResponse {
        version: ServerVersion {
            name: "1.20.4".to_string(),
            protocol: 765,
        },
        players: ServerPlayers {
            max: 100,
            online,
            sample: None,
        },
        description: ServerDescription::Plain("A Minecraft Server".to_string()),
        favicon: None,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// `session` is `None` for a failed attempt
    Login { at: Duration, session: Option<u32> },
    Command { at: Duration, session: u32, text: String },
    Status { at: Duration, online: Option<u32> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommandRecord {
    pub at: Duration,
    pub session: u32,
    pub text: String,
}

/// Shared, time-stamped record of every call made against the fakes
#[derive(Clone)]
pub struct Journal {
    start: Instant,
    events: Arc<Mutex<Vec<Event>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn command_log(&self) -> Vec<CommandRecord> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Command { at, session, text } => Some(CommandRecord { at, session, text }),
                _ => None,
            })
            .collect()
    }

    pub fn commands(&self) -> Vec<String> {
        self.command_log().into_iter().map(|c| c.text).collect()
    }

    pub fn login_times(&self) -> Vec<Duration> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Login { at, .. } => Some(at),
                _ => None,
            })
            .collect()
    }

    pub fn login_attempts(&self) -> usize {
        self.login_times().len()
    }

    /// Ids of the sessions that logged in successfully, in order
    pub fn sessions(&self) -> Vec<u32> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Login {
                    session: Some(id), ..
                } => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn status_times(&self) -> Vec<Duration> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Status { at, .. } => Some(at),
                _ => None,
            })
            .collect()
    }
}

struct ConnectorState {
    refuse: u32,
    reject: u32,
    opened: u32,
    drop_after: Option<usize>,
}

pub struct MockConnector {
    journal: Journal,
    state: Mutex<ConnectorState>,
}

impl MockConnector {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            state: Mutex::new(ConnectorState {
                refuse: 0,
                reject: 0,
                opened: 0,
                drop_after: None,
            }),
        }
    }

    /// The next `n` attempts find nothing listening
    pub fn refuse_connections(self, n: u32) -> Self {
        self.state.lock().unwrap().refuse = n;
        self
    }

    /// After any refusals, the next `n` attempts get a wrong-password reply
    pub fn reject_passwords(self, n: u32) -> Self {
        self.state.lock().unwrap().reject = n;
        self
    }

    /// Sessions lose their connection after `n` successful commands
    pub fn drop_after(self, n: usize) -> Self {
        self.state.lock().unwrap().drop_after = Some(n);
        self
    }
}

impl ConsoleConnector for MockConnector {
    type Session = MockSession;

    async fn open(&self) -> Result<MockSession, ConsoleError> {
        let mut state = self.state.lock().unwrap();
        let at = self.journal.now();

        if state.refuse > 0 {
            state.refuse -= 1;
            self.journal.record(Event::Login { at, session: None });
            return Err(ConsoleError::Connect(io::Error::from(
                io::ErrorKind::ConnectionRefused,
            )));
        }
        if state.reject > 0 {
            state.reject -= 1;
            self.journal.record(Event::Login { at, session: None });
            return Err(ConsoleError::AuthRejected);
        }

        state.opened += 1;
        let id = state.opened;
        self.journal.record(Event::Login {
            at,
            session: Some(id),
        });

        Ok(MockSession {
            journal: self.journal.clone(),
            id,
            remaining: state.drop_after,
        })
    }
}

pub struct MockSession {
    journal: Journal,
    id: u32,
    remaining: Option<usize>,
}

impl Console for MockSession {
    async fn command(&mut self, command: &str) -> Result<String, ConsoleError> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return Err(ConsoleError::Io(io::Error::from(
                    io::ErrorKind::ConnectionReset,
                )));
            }
            *remaining -= 1;
        }

        self.journal.record(Event::Command {
            at: self.journal.now(),
            session: self.id,
            text: command.to_string(),
        });
        Ok(String::new())
    }
}

/// Answers status queries from a script, then from a fixed fallback
///
/// `Some(n)` is an online server with `n` players, `None` is unreachable.
pub struct MockStatus {
    journal: Journal,
    script: Mutex<VecDeque<Option<u32>>>,
    fallback: Option<u32>,
}

impl MockStatus {
    pub fn new(journal: Journal, fallback: Option<u32>) -> Self {
        Self {
            journal,
            script: Mutex::new(VecDeque::new()),
            fallback,
        }
    }

    pub fn then(self, answer: Option<u32>) -> Self {
        self.script.lock().unwrap().push_back(answer);
        self
    }
}

impl StatusSource for MockStatus {
    async fn status(&self) -> Result<StatusResponse, StatusError> {
        let answer = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback);

        self.journal.record(Event::Status {
            at: self.journal.now(),
            online: answer,
        });

        match answer {
            Some(online) => Ok(status_with(online)),
            None => Err(StatusError::Unreachable),
        }
    }
}
