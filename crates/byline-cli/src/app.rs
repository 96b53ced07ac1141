//! Wiring and command handlers.

use anyhow::{Result, bail};
use byline_client::HttpGateway;
use byline_core::health::HealthGateway;
use byline_core::query::{QueryController, QueryOutcome};
use byline_core::session::SessionManager;
use byline_core::timer::TimerGateway;
use byline_infrastructure::{DefaultIdentityProvider, JsonFileSessionStore};
use colored::Colorize;
use std::sync::Arc;

pub struct App {
    pub sessions: Arc<SessionManager>,
    controller: QueryController,
    gateway: Arc<HttpGateway>,
}

impl App {
    /// Builds the gateway, the store, and the session manager, and
    /// hydrates the persisted session before anything protected is
    /// reachable.
    pub async fn bootstrap(base_url: &str) -> Result<Self> {
        let gateway = Arc::new(HttpGateway::new(base_url)?);
        let store = Arc::new(JsonFileSessionStore::new()?);
        let sessions = Arc::new(SessionManager::new(
            store,
            gateway.clone(),
            Arc::new(DefaultIdentityProvider),
        ));
        sessions.initialize().await;

        let controller = QueryController::new(gateway.clone(), sessions.clone());

        Ok(Self {
            sessions,
            controller,
            gateway,
        })
    }

    pub fn timer_gateway(&self) -> Arc<dyn TimerGateway> {
        self.gateway.clone()
    }

    pub async fn login(&self, token: &str) -> Result<()> {
        let profile = self.sessions.login(token).await?;
        println!(
            "{}",
            format!("Signed in as {} <{}>", profile.name, profile.email).green()
        );
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        self.sessions.logout().await?;
        println!("Signed out.");
        Ok(())
    }

    pub async fn whoami(&self) -> Result<()> {
        match self.sessions.current_profile().await {
            Some(profile) => println!("{} <{}>", profile.name, profile.email),
            None => println!("Not signed in."),
        }
        Ok(())
    }

    pub async fn status(&self) -> Result<()> {
        let health = self.gateway.service_health().await?;
        println!("API Status: {}", health.message);
        println!("Model: {}", health.model);
        Ok(())
    }

    /// One-shot question from the command line.
    pub async fn ask_once(&self, question: &str) -> Result<()> {
        if !self.sessions.is_authenticated().await {
            bail!("not signed in; run `byline login <token>` first");
        }
        self.ask(question).await
    }

    /// Shared submission path: both the one-shot command and the
    /// interactive loop end up here, and this is the only place that
    /// calls the controller.
    pub async fn ask(&self, question: &str) -> Result<()> {
        println!("{}", "Thinking...".dimmed());
        match self.controller.submit(question).await {
            Ok(outcome) => render_outcome(&outcome),
            Err(rejection) => println!("{}", rejection.to_string().yellow()),
        }
        Ok(())
    }
}

fn render_outcome(outcome: &QueryOutcome) {
    match outcome {
        QueryOutcome::Answered {
            answer,
            query_time,
            response_time,
        } => {
            // Verbatim answer body; rendering markdown is not our job
            println!("{answer}");
            if let Some(secs) = query_time {
                println!("{}", format!("Model query time: {secs:.2}s").bright_blue());
            }
            if let Some(secs) = response_time {
                println!(
                    "{}",
                    format!("Model response time: {secs:.2}s").bright_blue()
                );
            }
        }
        QueryOutcome::Unauthorized => {
            println!("{}", "Session expired. Please sign in again.".red());
        }
        QueryOutcome::Failed { message } => println!("{}", message.red()),
        QueryOutcome::Idle | QueryOutcome::Pending => {}
    }
}
