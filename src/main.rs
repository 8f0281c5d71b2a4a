use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockscope_client::{
    AppState, Config,
    controllers::{
        auth::{self, LoginForm},
        dashboard::{self, Dashboard},
    },
    notification::Notification,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let state = AppState::new(&config)?;
    tracing::info!("✅ AppState initialized");

    match auth::entry_redirect(&state) {
        Some(_) => tracing::info!("✅ Restored saved session"),
        None => {
            let Some(credentials) = config.credentials.clone() else {
                tracing::warn!("🚪 Not logged in. Set STOCKSCOPE_EMAIL and STOCKSCOPE_PASSWORD to log in");
                return Ok(());
            };

            let form = LoginForm {
                email: credentials.email,
                password: credentials.password,
            };
            if let Err(e) = auth::login(&state, &form).await {
                let notification = Notification::from(&e);
                tracing::error!("❌ {}", notification.message);
                return Err(e.into());
            }
        }
    }

    let dashboard = match dashboard::load(&state).await {
        Ok(dashboard) => dashboard,
        Err(e) => {
            if let Some(route) = auth::redirect_for(&e) {
                tracing::warn!("🚪 Session expired, log in again ({})", route);
            }
            return Err(e.into());
        }
    };

    log_dashboard(&dashboard);
    Ok(())
}

fn log_dashboard(dashboard: &Dashboard) {
    tracing::info!("👋 Welcome back, {}", dashboard.user_name);

    match &dashboard.courses {
        Ok(courses) => {
            for course in courses {
                tracing::info!(
                    "📚 {} [{}] {}",
                    course.title(),
                    course.category(),
                    course.level().unwrap_or("-")
                );
            }
        }
        Err(n) => tracing::warn!("📚 {}", n.message),
    }

    match &dashboard.blogs {
        Ok(blogs) => {
            for blog in blogs {
                tracing::info!("📰 {} by {}", blog.title(), blog.author());
            }
        }
        Err(n) => tracing::warn!("📰 {}", n.message),
    }

    match &dashboard.term_of_the_day {
        Ok(Some(term)) => {
            tracing::info!("📖 Term of the day: {}: {}", term.term_name(), term.definition())
        }
        Ok(None) => tracing::info!("📖 The dictionary is empty"),
        Err(n) => tracing::warn!("📖 {}", n.message),
    }
}
