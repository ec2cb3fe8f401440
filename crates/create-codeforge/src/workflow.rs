//! Scaffolding workflow
//!
//! Runs the stages strictly in order:
//! name -> branch -> fetch -> git init -> probe/resolve -> cleanup ->
//! manifest -> install -> summary
//!
//! Directory collisions, missing package managers, and failed installs end
//! the run as [`Outcome::Aborted`]. Template download errors propagate as
//! errors. Everything else (git init, cleanup, manifest) is reported and the
//! run continues.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use codeforge_core::host::{CommandRunner, ExecutableResolver, Prompter, TemplateFetcher};
use codeforge_core::manifest::{self, ManifestEdit};
use codeforge_core::resolver::{self, Resolution, Selection};
use codeforge_core::types::TEMPLATE_BRANCHES;
use codeforge_core::{
    cleanup, git, install, probe, AvailableManagers, Error, ManifestPolicy, PackageManager,
};
use std::process::ExitCode;
use tracing::{debug, warn};

use crate::cli::RunOptions;
use crate::output;

/// Workflow stages, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    NameCollected,
    TemplateFetched,
    VcsInitialized,
    ManagerResolved,
    CleanupDone,
    ManifestUpdated,
    DependenciesInstalled,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::NameCollected => "name-collected",
            Self::TemplateFetched => "template-fetched",
            Self::VcsInitialized => "vcs-initialized",
            Self::ManagerResolved => "manager-resolved",
            Self::CleanupDone => "cleanup-done",
            Self::ManifestUpdated => "manifest-updated",
            Self::DependenciesInstalled => "dependencies-installed",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// A finished project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub project_name: String,
    pub project_dir: Utf8PathBuf,
    pub manager: PackageManager,
}

/// How a run ended
#[derive(Debug)]
pub enum Outcome {
    Done(Summary),
    /// Stopped at `stage` (the last stage reached) because of `reason`
    Aborted { stage: Stage, reason: Error },
}

impl Outcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Done(_) => ExitCode::SUCCESS,
            Self::Aborted { .. } => ExitCode::from(1),
        }
    }
}

/// External collaborators used by the workflow
pub struct Host<'a> {
    pub prompter: &'a dyn Prompter,
    pub fetcher: &'a dyn TemplateFetcher,
    pub resolver: &'a dyn ExecutableResolver,
    pub runner: &'a dyn CommandRunner,
}

/// One scaffolding run
pub struct Workflow<'a> {
    options: &'a RunOptions,
    host: Host<'a>,
    cwd: Utf8PathBuf,
    hint: Option<PackageManager>,
    stage: Stage,
}

impl<'a> Workflow<'a> {
    /// `cwd` is where the project directory is created; `hint` is the
    /// package manager that launched the tool, if any
    pub fn new(
        options: &'a RunOptions,
        host: Host<'a>,
        cwd: Utf8PathBuf,
        hint: Option<PackageManager>,
    ) -> Self {
        Self {
            options,
            host,
            cwd,
            hint,
            stage: Stage::Init,
        }
    }

    fn advance(&mut self, stage: Stage) {
        debug!("Stage {} -> {}", self.stage, stage);
        self.stage = stage;
    }

    fn abort(&self, reason: Error) -> Outcome {
        output::error(&reason.to_string());
        debug!("Aborted after stage {}: {}", self.stage, reason);
        Outcome::Aborted {
            stage: self.stage,
            reason,
        }
    }

    /// Run every stage to completion or abort
    pub async fn run(mut self) -> Result<Outcome> {
        output::banner("🚀 Welcome to create-codeforge!");

        let project_name = self.collect_project_name()?;
        let project_dir = self.cwd.join(&project_name);
        if project_dir.exists() {
            return Ok(self.abort(Error::project_exists(&project_name)));
        }
        self.advance(Stage::NameCollected);

        let branch = self.collect_branch()?;
        self.fetch_template(&branch, &project_dir).await?;
        self.advance(Stage::TemplateFetched);

        if self
            .host
            .prompter
            .confirm("Do you want to initialize a git repository?", true)?
        {
            match git::init_repository(self.host.runner, &project_dir).await {
                Ok(()) => output::success("Git initialized."),
                Err(e) => {
                    warn!("{}", e);
                    output::error("Git initialization failed.");
                }
            }
            self.advance(Stage::VcsInitialized);
        }

        let manager = match self.resolve_manager() {
            Ok(manager) => manager,
            Err(e @ Error::NoManagerFound) => return Ok(self.abort(e)),
            Err(e) => return Err(e.into()),
        };
        self.advance(Stage::ManagerResolved);

        self.cleanup_template(manager, &project_dir);
        self.advance(Stage::CleanupDone);

        match self.update_manifest(manager, &project_dir).await {
            Ok(Some(edit)) => {
                debug!("Manifest edit: {:?}", edit);
                output::note(&format!(
                    "Updated {} with {}.",
                    manifest::MANIFEST_FILE,
                    manager
                ));
            }
            Ok(None) => {}
            Err(e) => {
                warn!("{}", e);
                output::error(&format!("Failed to update {}.", manifest::MANIFEST_FILE));
                output::warning(&e.to_string());
            }
        }
        self.advance(Stage::ManifestUpdated);

        output::info(&format!("📦 Installing dependencies with {}...", manager));
        if let Err(e) = install::install_dependencies(self.host.runner, manager, &project_dir).await
        {
            return Ok(self.abort(e));
        }
        self.advance(Stage::DependenciesInstalled);

        let summary = Summary {
            project_name,
            project_dir,
            manager,
        };
        print_summary(&summary);
        self.advance(Stage::Done);

        Ok(Outcome::Done(summary))
    }

    fn collect_project_name(&self) -> Result<String> {
        let name = self.host.prompter.input(
            "Enter your project name:",
            &self.options.config.default_project_name,
            &validate_project_name,
        )?;
        let name = name.trim().to_string();
        validate_project_name(&name).map_err(|reason| Error::invalid_project_name(&name, reason))?;
        Ok(name)
    }

    fn collect_branch(&self) -> Result<String> {
        if let Some(branch) = &self.options.branch {
            debug!("Using branch from --branch: {}", branch);
            return Ok(branch.clone());
        }

        let items: Vec<String> = TEMPLATE_BRANCHES.iter().map(|b| b.to_string()).collect();
        let index = self.host.prompter.select(
            "Select the branch to download from:",
            &items,
            self.options.config.default_branch_index(),
        )?;

        items
            .get(index)
            .cloned()
            .ok_or_else(|| Error::invalid_branch(index.to_string()).into())
    }

    async fn fetch_template(&self, branch: &str, project_dir: &Utf8Path) -> Result<()> {
        let spinner = output::spinner(&format!(
            "📥 Downloading template from branch \"{}\"...",
            branch
        ));
        let fetched = self.host.fetcher.fetch(branch, project_dir).await;
        spinner.finish_and_clear();

        fetched.with_context(|| format!("Failed to download template from branch \"{}\"", branch))?;
        output::success(&format!("Template downloaded from \"{}\" branch.", branch));
        Ok(())
    }

    fn resolve_manager(&self) -> codeforge_core::Result<PackageManager> {
        let available = match self.hint {
            Some(hint) => {
                debug!("Launched by {}, skipping the search path probe", hint);
                AvailableManagers::default()
            }
            None => probe::detect_available_managers(self.host.resolver),
        };
        debug!("Available package managers: {:?}", available.as_slice());

        let resolution = match resolver::resolve(self.hint, &available, self.options.config.selection)? {
            Resolution::Choose(candidates) => {
                let items: Vec<String> = candidates.iter().map(|pm| pm.to_string()).collect();
                let index = self.host.prompter.select(
                    "Which package manager do you want to use?",
                    &items,
                    0,
                )?;
                resolver::choose(&candidates, index)?
            }
            selected => selected,
        };

        let Resolution::Selected { manager, selection } = resolution else {
            return Err(Error::NoManagerFound);
        };

        match selection {
            Selection::Hinted => output::info(&format!("🧠 Detected package manager: \"{}\"", manager)),
            Selection::OnlyAvailable | Selection::FirstAvailable => output::info(&format!(
                "🧠 No active package manager detected. Defaulting to \"{}\".",
                manager
            )),
            Selection::UserChoice => output::info(&format!("🧠 Using \"{}\".", manager)),
        }

        Ok(manager)
    }

    fn cleanup_template(&self, manager: PackageManager, project_dir: &Utf8Path) {
        let report = cleanup::cleanup(manager, project_dir);
        for path in &report.removed {
            output::note(&format!(
                "Clean up for compatibility with {}: removed {}",
                manager,
                path.file_name().unwrap_or(path.as_str())
            ));
        }
        for failure in &report.failed {
            output::warning(&failure.to_string());
        }
    }

    async fn update_manifest(
        &self,
        manager: PackageManager,
        project_dir: &Utf8Path,
    ) -> codeforge_core::Result<Option<ManifestEdit>> {
        let policy = self.options.config.manifest_policy;
        let npm_version = if manager == PackageManager::Npm && policy == ManifestPolicy::Declare {
            Some(install::manager_version(self.host.runner, manager, project_dir).await?)
        } else {
            None
        };

        manifest::update_manifest(manager, project_dir, policy, npm_version.as_deref())
    }
}

/// Project names become a single directory under the current one
pub fn validate_project_name(name: &str) -> std::result::Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Project name must not be empty".to_string());
    }
    if name == "." || name == ".." {
        return Err("Project name must not be \".\" or \"..\"".to_string());
    }
    if name.contains(['/', '\\']) || name.chars().any(char::is_control) {
        return Err("Project name must be a single directory name".to_string());
    }
    Ok(())
}

fn print_summary(summary: &Summary) {
    let pm = summary.manager.as_str();
    output::boxed(&[
        console::style("✔ Project setup complete!").green().to_string(),
        String::new(),
        "Next steps:".to_string(),
        format!("  {}", console::style(format!("cd {}", summary.project_name)).cyan()),
        format!("  {}", console::style(format!("{} run build", pm)).cyan()),
        format!("  {}", console::style(format!("{} run dev", pm)).cyan()),
        String::new(),
        "Happy coding! 🚀".to_string(),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use codeforge_core::host::RunStatus;
    use codeforge_core::{ScaffoldConfig, SelectionPolicy};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const TEMPLATE_MANIFEST: &str = r#"{
  "name": "codeforge",
  "private": true,
  "scripts": {
    "build": "turbo run build",
    "dev": "turbo run dev"
  },
  "packageManager": "pnpm@9.1.0"
}"#;

    enum Answer {
        Text(&'static str),
        Pick(usize),
        Yes(bool),
    }

    /// Answers prompts in order and records the questions asked
    struct ScriptedPrompter {
        answers: RefCell<VecDeque<Answer>>,
        asked: RefCell<Vec<String>>,
    }

    impl ScriptedPrompter {
        fn new(answers: Vec<Answer>) -> Self {
            Self {
                answers: RefCell::new(answers.into()),
                asked: RefCell::new(Vec::new()),
            }
        }

        fn next(&self, question: &str) -> Answer {
            self.asked.borrow_mut().push(question.to_string());
            self.answers
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected prompt: {}", question))
        }

        fn asked(&self, fragment: &str) -> bool {
            self.asked.borrow().iter().any(|q| q.contains(fragment))
        }
    }

    impl Prompter for ScriptedPrompter {
        fn input(
            &self,
            question: &str,
            default: &str,
            validate: &dyn Fn(&str) -> std::result::Result<(), String>,
        ) -> codeforge_core::Result<String> {
            match self.next(question) {
                Answer::Text("") => Ok(default.to_string()),
                Answer::Text(text) => {
                    validate(text).map_err(Error::prompt)?;
                    Ok(text.to_string())
                }
                _ => panic!("expected text answer for {}", question),
            }
        }

        fn select(
            &self,
            question: &str,
            _items: &[String],
            default: usize,
        ) -> codeforge_core::Result<usize> {
            match self.next(question) {
                Answer::Pick(index) => Ok(index),
                Answer::Text("") => Ok(default),
                _ => panic!("expected pick answer for {}", question),
            }
        }

        fn confirm(&self, question: &str, _default: bool) -> codeforge_core::Result<bool> {
            match self.next(question) {
                Answer::Yes(yes) => Ok(yes),
                _ => panic!("expected yes/no answer for {}", question),
            }
        }
    }

    /// Writes a pnpm-flavored template, or fails
    #[derive(Default)]
    struct FakeFetcher {
        fail: bool,
        branches: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TemplateFetcher for FakeFetcher {
        async fn fetch(&self, branch: &str, destination: &Utf8Path) -> codeforge_core::Result<()> {
            self.branches.lock().unwrap().push(branch.to_string());
            if self.fail {
                return Err(Error::branch_not_found("Jack-WebDev/codeforge", branch));
            }
            std::fs::create_dir_all(destination.join(".pnpm"))?;
            std::fs::write(destination.join("package.json"), TEMPLATE_MANIFEST)?;
            std::fs::write(destination.join("pnpm-lock.yaml"), "lockfileVersion: '9.0'\n")?;
            std::fs::write(destination.join("pnpm-workspace.yaml"), "packages:\n")?;
            std::fs::write(destination.join(".npmrc"), "auto-install-peers=true\n")?;
            Ok(())
        }
    }

    struct FakeResolver {
        installed: Vec<&'static str>,
        queried: RefCell<Vec<String>>,
    }

    impl ExecutableResolver for FakeResolver {
        fn which(&self, name: &str) -> codeforge_core::Result<PathBuf> {
            self.queried.borrow_mut().push(name.to_string());
            if self.installed.contains(&name) {
                Ok(PathBuf::from("/usr/local/bin").join(name))
            } else {
                Err(Error::executable_not_found(name, "cannot find binary path"))
            }
        }
    }

    #[derive(Default)]
    struct FakeRunner {
        failing: Vec<&'static str>,
        commands: Mutex<Vec<String>>,
    }

    impl FakeRunner {
        fn failing(commands: Vec<&'static str>) -> Self {
            Self {
                failing: commands,
                ..Default::default()
            }
        }

        fn commands(&self) -> Vec<String> {
            self.commands.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for FakeRunner {
        async fn run(
            &self,
            program: &str,
            args: &[&str],
            _cwd: &Utf8Path,
        ) -> codeforge_core::Result<RunStatus> {
            let command = format!("{} {}", program, args.join(" "));
            self.commands.lock().unwrap().push(command.clone());
            let code = if self.failing.contains(&command.as_str()) { 1 } else { 0 };
            Ok(RunStatus { code: Some(code) })
        }

        async fn capture(
            &self,
            program: &str,
            args: &[&str],
            _cwd: &Utf8Path,
        ) -> codeforge_core::Result<String> {
            self.commands
                .lock()
                .unwrap()
                .push(format!("{} {}", program, args.join(" ")));
            Ok("10.2.4".to_string())
        }
    }

    struct Harness {
        _temp: TempDir,
        cwd: Utf8PathBuf,
        options: RunOptions,
        prompter: ScriptedPrompter,
        fetcher: FakeFetcher,
        resolver: FakeResolver,
        runner: FakeRunner,
    }

    impl Harness {
        fn new(answers: Vec<Answer>, installed: Vec<&'static str>) -> Self {
            let temp = TempDir::new().unwrap();
            let cwd = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
            Self {
                _temp: temp,
                cwd,
                options: RunOptions {
                    branch: None,
                    config: ScaffoldConfig::default(),
                },
                prompter: ScriptedPrompter::new(answers),
                fetcher: FakeFetcher::default(),
                resolver: FakeResolver {
                    installed,
                    queried: RefCell::new(Vec::new()),
                },
                runner: FakeRunner::default(),
            }
        }

        async fn run(&self, hint: Option<PackageManager>) -> Result<Outcome> {
            let host = Host {
                prompter: &self.prompter,
                fetcher: &self.fetcher,
                resolver: &self.resolver,
                runner: &self.runner,
            };
            Workflow::new(&self.options, host, self.cwd.clone(), hint)
                .run()
                .await
        }

        fn manifest(&self, name: &str) -> serde_json::Value {
            let content =
                std::fs::read_to_string(self.cwd.join(name).join("package.json")).unwrap();
            serde_json::from_str(&content).unwrap()
        }
    }

    fn done(outcome: Outcome) -> Summary {
        match outcome {
            Outcome::Done(summary) => summary,
            Outcome::Aborted { stage, reason } => panic!("aborted at {}: {}", stage, reason),
        }
    }

    #[test]
    fn test_validate_project_name() {
        assert!(validate_project_name("my-app").is_ok());
        assert!(validate_project_name("  spaced  ").is_ok());
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name("   ").is_err());
        assert!(validate_project_name("..").is_err());
        assert!(validate_project_name("a/b").is_err());
        assert!(validate_project_name("a\\b").is_err());
    }

    #[tokio::test]
    async fn test_npm_only_host_runs_to_completion() {
        let h = Harness::new(
            vec![Answer::Text(""), Answer::Pick(0), Answer::Yes(true)],
            vec!["npm"],
        );

        let outcome = h.run(None).await.unwrap();
        assert_eq!(outcome.exit_code(), ExitCode::SUCCESS);
        let summary = done(outcome);

        assert_eq!(summary.project_name, "my-app");
        assert_eq!(summary.manager, PackageManager::Npm);
        assert!(!h.prompter.asked("package manager"));
        assert_eq!(*h.resolver.queried.borrow(), vec!["pnpm", "yarn", "npm"]);
        assert_eq!(*h.fetcher.branches.lock().unwrap(), vec!["main"]);
        assert_eq!(h.runner.commands(), vec!["git init", "npm -v", "npm install"]);

        let dir = h.cwd.join("my-app");
        assert!(!dir.join("pnpm-lock.yaml").exists());
        assert!(!dir.join(".pnpm").exists());
        let manifest = h.manifest("my-app");
        assert_eq!(manifest["packageManager"], "npm@10.2.4");
        assert_eq!(manifest["workspaces"], serde_json::json!(["apps/*", "packages/*"]));
    }

    #[tokio::test]
    async fn test_several_managers_prompt_for_choice() {
        let h = Harness::new(
            vec![
                Answer::Text("shop"),
                Answer::Pick(1),
                Answer::Yes(false),
                Answer::Pick(0),
            ],
            vec!["yarn", "npm"],
        );

        let summary = done(h.run(None).await.unwrap());

        assert_eq!(summary.manager, PackageManager::Yarn);
        assert!(h.prompter.asked("Which package manager"));
        assert_eq!(*h.fetcher.branches.lock().unwrap(), vec!["dev"]);
        assert_eq!(h.runner.commands(), vec!["yarn install"]);

        let manifest = h.manifest("shop");
        assert_eq!(manifest["packageManager"], "yarn@1.22.19");
        assert_eq!(manifest["workspaces"], serde_json::json!(["apps/*", "packages/*"]));
        assert_eq!(manifest["name"], "codeforge");
    }

    #[tokio::test]
    async fn test_first_policy_skips_choice() {
        let mut h = Harness::new(
            vec![Answer::Text(""), Answer::Pick(0), Answer::Yes(false)],
            vec!["yarn", "npm", "pnpm"],
        );
        h.options.config.selection = SelectionPolicy::First;

        let summary = done(h.run(None).await.unwrap());
        assert_eq!(summary.manager, PackageManager::Pnpm);
        assert!(!h.prompter.asked("Which package manager"));
    }

    #[tokio::test]
    async fn test_existing_directory_aborts_before_fetch() {
        let h = Harness::new(vec![Answer::Text("taken")], vec!["npm"]);
        std::fs::create_dir_all(h.cwd.join("taken")).unwrap();

        let outcome = h.run(None).await.unwrap();

        assert_eq!(outcome.exit_code(), ExitCode::from(1));
        assert!(matches!(
            outcome,
            Outcome::Aborted {
                stage: Stage::Init,
                reason: Error::ProjectExists { .. }
            }
        ));
        assert!(h.fetcher.branches.lock().unwrap().is_empty());
        assert!(!h.prompter.asked("branch"));
        assert!(h.runner.commands().is_empty());
    }

    #[tokio::test]
    async fn test_no_manager_found_aborts() {
        let h = Harness::new(
            vec![Answer::Text(""), Answer::Pick(0), Answer::Yes(false)],
            vec![],
        );

        let outcome = h.run(None).await.unwrap();

        assert!(matches!(
            outcome,
            Outcome::Aborted {
                stage: Stage::TemplateFetched,
                reason: Error::NoManagerFound
            }
        ));
        // fetched template is left as downloaded
        assert!(h.cwd.join("my-app/pnpm-lock.yaml").exists());
        assert!(h.runner.commands().is_empty());
    }

    #[tokio::test]
    async fn test_hint_wins_and_pnpm_leaves_template_untouched() {
        let h = Harness::new(
            vec![Answer::Text(""), Answer::Pick(0), Answer::Yes(false)],
            vec![],
        );

        let summary = done(h.run(Some(PackageManager::Pnpm)).await.unwrap());

        assert_eq!(summary.manager, PackageManager::Pnpm);
        let dir = h.cwd.join("my-app");
        assert!(dir.join("pnpm-lock.yaml").exists());
        assert_eq!(
            std::fs::read_to_string(dir.join("package.json")).unwrap(),
            TEMPLATE_MANIFEST
        );
        assert_eq!(h.runner.commands(), vec!["pnpm install"]);
        assert!(h.resolver.queried.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_hint_skips_probe_and_choice() {
        let h = Harness::new(
            vec![Answer::Text(""), Answer::Pick(0), Answer::Yes(false)],
            vec!["pnpm", "yarn", "npm"],
        );

        let summary = done(h.run(Some(PackageManager::Yarn)).await.unwrap());

        assert_eq!(summary.manager, PackageManager::Yarn);
        assert!(h.resolver.queried.borrow().is_empty());
        assert!(!h.prompter.asked("Which package manager"));
        assert_eq!(h.manifest("my-app")["packageManager"], "yarn@1.22.19");
    }

    #[tokio::test]
    async fn test_branch_flag_skips_branch_prompt() {
        let mut h = Harness::new(vec![Answer::Text(""), Answer::Yes(false)], vec!["npm"]);
        h.options.branch = Some("test".to_string());

        done(h.run(None).await.unwrap());

        assert!(!h.prompter.asked("branch"));
        assert_eq!(*h.fetcher.branches.lock().unwrap(), vec!["test"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let mut h = Harness::new(vec![Answer::Text(""), Answer::Pick(2)], vec!["npm"]);
        h.fetcher.fail = true;

        let err = h.run(None).await.unwrap_err();

        assert!(err.to_string().contains("Failed to download template"));
        assert!(h.runner.commands().is_empty());
    }

    #[tokio::test]
    async fn test_git_failure_continues() {
        let mut h = Harness::new(
            vec![Answer::Text(""), Answer::Pick(0), Answer::Yes(true)],
            vec!["yarn"],
        );
        h.runner = FakeRunner::failing(vec!["git init"]);

        let summary = done(h.run(None).await.unwrap());

        assert_eq!(summary.manager, PackageManager::Yarn);
        assert_eq!(h.runner.commands(), vec!["git init", "yarn install"]);
    }

    #[tokio::test]
    async fn test_install_failure_aborts() {
        let mut h = Harness::new(
            vec![Answer::Text(""), Answer::Pick(0), Answer::Yes(false)],
            vec!["yarn"],
        );
        h.runner = FakeRunner::failing(vec!["yarn install"]);

        let outcome = h.run(None).await.unwrap();

        assert_eq!(outcome.exit_code(), ExitCode::from(1));
        assert!(matches!(
            outcome,
            Outcome::Aborted {
                stage: Stage::ManifestUpdated,
                reason: Error::InstallFailed { .. }
            }
        ));
    }

    #[tokio::test]
    async fn test_unreadable_manifest_is_not_fatal() {
        let mut h = Harness::new(
            vec![Answer::Text(""), Answer::Pick(0), Answer::Yes(false)],
            vec!["npm"],
        );
        h.options.config.manifest_policy = ManifestPolicy::Strip;

        // break the manifest as soon as it lands
        struct BrokenManifestFetcher;
        #[async_trait]
        impl TemplateFetcher for BrokenManifestFetcher {
            async fn fetch(&self, _branch: &str, dest: &Utf8Path) -> codeforge_core::Result<()> {
                std::fs::create_dir_all(dest)?;
                std::fs::write(dest.join("package.json"), "{ broken")?;
                Ok(())
            }
        }

        let host = Host {
            prompter: &h.prompter,
            fetcher: &BrokenManifestFetcher,
            resolver: &h.resolver,
            runner: &h.runner,
        };
        let outcome = Workflow::new(&h.options, host, h.cwd.clone(), None)
            .run()
            .await
            .unwrap();

        assert_eq!(done(outcome).manager, PackageManager::Npm);
        assert_eq!(h.runner.commands(), vec!["npm install"]);
    }
}
