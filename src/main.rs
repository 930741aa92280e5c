use std::sync::Arc;

use anyhow::Context;

use todo_client::{ApiClient, ApiConfig, FileTokenStore, TaskId, TokenGrant, TokenStore};

const USAGE: &str = "\
usage: todo-client <command> [args]

commands:
  login <username> <password>           authenticate as a user
  login-admin <username> <password>     authenticate as an admin
  register <username> <password>        create a user account
  register-admin <username> <password>  create an admin account
  tasks                                 list tasks
  create <title> <description>          create a task
  update <id> <title> <description>     update a task
  delete <id>                           delete a task
  logout                                forget the stored session
";

struct Environment {
    token_file: Option<String>,
}

fn read_environment() -> Environment {
    let token_file = std::env::var("TODO_TOKEN_FILE").ok();

    Environment { token_file }
}

fn init_logging() {
    env_logger::init();
}

fn create_token_store(env: &Environment) -> anyhow::Result<Arc<dyn TokenStore>> {
    let store = match &env.token_file {
        Some(path) => FileTokenStore::new(path),
        None => FileTokenStore::in_default_location()?,
    };

    log::info!("Session token file: {}", store.path().display());

    Ok(Arc::new(store))
}

fn create_client(env: &Environment) -> anyhow::Result<ApiClient> {
    let config = ApiConfig::from_env();
    log::info!("Using backend at {}", config.base_url);

    let tokens = create_token_store(env)?;

    Ok(ApiClient::new(config, tokens))
}

fn parse_task_id(raw: &str) -> anyhow::Result<TaskId> {
    raw.parse().with_context(|| format!("invalid task id: {raw}"))
}

fn report_grant(verb: &str, grant: &TokenGrant) {
    match &grant.role {
        Some(role) => println!("{verb} as {role}."),
        None => println!("{verb}."),
    }
}

async fn run(args: &[&str]) -> anyhow::Result<()> {
    let environment = read_environment();
    let client = create_client(&environment)?;

    match args {
        ["login", username, password] => {
            let grant = client.auth.login_user(username, password).await?;
            report_grant("Logged in", &grant);
        }
        ["login-admin", username, password] => {
            let grant = client.auth.login_admin(username, password).await?;
            report_grant("Logged in", &grant);
        }
        ["register", username, password] => {
            let grant = client.auth.register_user(username, password).await?;
            report_grant("Registered", &grant);
        }
        ["register-admin", username, password] => {
            let grant = client.auth.register_admin(username, password).await?;
            report_grant("Registered", &grant);
        }
        ["tasks"] => {
            for task in client.tasks.list_tasks().await? {
                println!(
                    "{}\t{}\t{}",
                    task.id,
                    task.title,
                    task.description.as_deref().unwrap_or("")
                );
            }
        }
        ["create", title, description] => {
            let receipt = client.tasks.create_task(title, description).await?;
            println!("{}", receipt.msg);
        }
        ["update", id, title, description] => {
            let receipt = client
                .tasks
                .update_task(parse_task_id(id)?, title, description)
                .await?;
            println!("{}", receipt.msg);
        }
        ["delete", id] => {
            let receipt = client.tasks.delete_task(parse_task_id(id)?).await?;
            println!("{}", receipt.msg);
        }
        ["logout"] => {
            client.auth.logout().await?;
            println!("Logged out.");
        }
        _ => {
            eprint!("{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    if let Err(err) = run(&args).await {
        // Callers of the API layer display the normalized message verbatim.
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
