use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::Parser;
use tracing::{error, info, level_filters::LevelFilter, warn};

use crate::{
    checker::{
        CheckerConfig, LeetCodeChecker, SubmissionChecker, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT,
    },
    notify::{DesktopNotifier, NoopNotifier, Notifier},
    report::{check_roster, CheckResult, Report},
    roster::{load_roster, DEFAULT_ROSTER_FILE},
    utils::{
        clock::{Clock, DefaultClock},
        dir::create_application_default_path,
        logging::{enable_logging, LOG_PREFIX},
        time::format_moment,
    },
};

#[derive(Parser, Debug)]
#[command(name = "acwatch", version, long_about = None)]
#[command(about = "Checks whether your friends solved a LeetCode problem today", long_about = None)]
pub struct Args {
    #[arg(
        long,
        env = "ACWATCH_ROSTER",
        default_value = DEFAULT_ROSTER_FILE,
        help = "File with one LeetCode username per line"
    )]
    pub roster: PathBuf,
    #[arg(long, env = "ACWATCH_ENDPOINT", default_value = DEFAULT_ENDPOINT, help = "GraphQL endpoint to query")]
    pub endpoint: String,
    #[arg(
        long,
        env = "ACWATCH_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Timeout of a single lookup in seconds"
    )]
    pub timeout: u64,
    #[arg(long = "no-notify", help = "Only print the result, don't send a desktop notification")]
    pub no_notify: bool,
    #[arg(long, help = "Print logs to the console")]
    pub log: bool,
    #[arg(
        long,
        help = "Application directory used for logs. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    pub dir: Option<PathBuf>,
}

impl Args {
    pub fn checker_config(&self) -> CheckerConfig {
        CheckerConfig {
            endpoint: self.endpoint.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    let app_dir = args.dir.clone().map_or_else(create_application_default_path, Ok)?;
    enable_logging(LOG_PREFIX, &app_dir.join("logs"), logging_level, args.log)?;

    let checker = LeetCodeChecker::new(args.checker_config(), Box::new(DefaultClock))?;
    let notifier: Box<dyn Notifier> = if args.no_notify {
        Box::new(NoopNotifier)
    } else {
        Box::new(DesktopNotifier::default())
    };

    run_check(&args.roster, &checker, notifier.as_ref(), &DefaultClock).await?;
    Ok(())
}

pub fn run_banner(now: &DateTime<Local>) -> String {
    format!("[{}] Running daily LeetCode check...", format_moment(now))
}

/// Performs one full pass: load the roster, check every user, then print and deliver the
/// summary. Only a roster failure is returned as an error.
pub async fn run_check(
    roster_path: &Path,
    checker: &dyn SubmissionChecker,
    notifier: &dyn Notifier,
    clock: &dyn Clock,
) -> Result<Report> {
    println!("{}", run_banner(&clock.time()));

    let roster = match load_roster(roster_path).await {
        Ok(v) => v,
        Err(e) => {
            println!("Error reading friends file: {e}");
            let body = format!("Could not read {}.", roster_path.display());
            if let Err(e) = notifier.notify("LeetCode Checker Error", &body).await {
                warn!("Failed to deliver error notification {e:?}");
            }
            return Err(e.into());
        }
    };
    info!("Checking {} users", roster.len());

    let results = check_roster(checker, &roster).await;
    for (username, result) in &results {
        if let CheckResult::CheckFailed(e) = result {
            println!("Could not check status for {username}: {e}");
        }
    }

    let report = Report::new(results);
    let summary = report.summary();
    let body = report.body();
    println!("{summary}\n{body}");

    println!("Check complete. Sending notification...");
    if let Err(e) = notifier.notify(&summary, &body).await {
        error!("Notification was not delivered {e:?}");
        println!("{e}");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use anyhow::Result;
    use chrono::{Local, TimeZone};
    use clap::Parser;
    use mockall::predicate::{always, eq, function};
    use tempfile::{tempdir, NamedTempFile};

    use crate::{
        checker::{error::CheckError, MockSubmissionChecker, DEFAULT_ENDPOINT},
        notify::{MockNotifier, NotificationError},
        roster::RosterError,
        utils::{clock::FixedClock, logging::TEST_LOGGING},
    };

    use super::{run_banner, run_check, Args};

    fn clock() -> FixedClock {
        FixedClock(Local.with_ymd_and_hms(2024, 7, 4, 9, 5, 3).earliest().unwrap())
    }

    fn roster_file(content: &str) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(content.as_bytes())?;
        Ok(file)
    }

    #[tokio::test]
    async fn test_missing_roster_aborts_before_checking() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let path = dir.path().join("friends.txt");
        // Any call on the checker would panic.
        let checker = MockSubmissionChecker::new();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .with(eq("LeetCode Checker Error"), function(|b: &str| b.contains("friends.txt")))
            .times(1)
            .returning(|_, _| Ok(()));

        let err = run_check(&path, &checker, &notifier, &clock()).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RosterError>(),
            Some(RosterError::Read { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_full_pass_notifies_summary() -> Result<()> {
        *TEST_LOGGING;
        let file = roster_file("alice\n\n  bob \ncarol\n")?;
        let mut checker = MockSubmissionChecker::new();
        checker
            .expect_check_solved_today()
            .with(eq("alice"))
            .returning(|_| Ok(true));
        checker
            .expect_check_solved_today()
            .with(eq("bob"))
            .returning(|_| Ok(false));
        checker
            .expect_check_solved_today()
            .with(eq("carol"))
            .returning(|_| {
                Err(CheckError::Query {
                    messages: vec!["That user does not exist.".into()],
                })
            });
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .with(
                eq("LeetCode Status: 1/3 Solved"),
                function(|b: &str| b.contains("- alice") && b.contains("- bob")),
            )
            .times(1)
            .returning(|_, _| Ok(()));

        let report = run_check(file.path(), &checker, &notifier, &clock()).await?;

        assert_eq!(report.solved, vec!["alice"]);
        assert_eq!(report.not_solved, vec!["bob"]);
        assert_eq!(report.failed.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_notification_failure_is_not_fatal() -> Result<()> {
        *TEST_LOGGING;
        let file = roster_file("alice")?;
        let mut checker = MockSubmissionChecker::new();
        checker
            .expect_check_solved_today()
            .returning(|_| Ok(false));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .with(always(), always())
            .times(1)
            .returning(|_, _| {
                Err(NotificationError::Spawn {
                    program: "notify-send".into(),
                    source: std::io::ErrorKind::NotFound.into(),
                })
            });

        let report = run_check(file.path(), &checker, &notifier, &clock()).await?;

        assert_eq!(report.not_solved, vec!["alice"]);
        Ok(())
    }

    #[test]
    fn test_run_banner_uses_clock_time() {
        assert_eq!(
            run_banner(&clock().0),
            "[2024-07-04 09:05:03] Running daily LeetCode check..."
        );
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["acwatch"]).unwrap();
        assert_eq!(args.roster.to_str(), Some("friends.txt"));
        assert!(!args.no_notify);
        let config = args.checker_config();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout.as_secs(), 15);
    }

    #[test]
    fn test_args_reject_zero_timeout() {
        assert!(Args::try_parse_from(["acwatch", "--timeout", "0"]).is_err());
    }
}
