use anyhow::Result;
use chrono::{TimeZone, Utc};
use git2::{Repository, Signature};
use git_cx::cli::commit::{compose_message, CommitCommand};
use git_cx::compose::LineConsole;
use git_cx::config::{persist_scope_history, ConfigResolver, RepoContext};
use git_cx::data::ScopeHistory;
use git_cx::git::GitRepository;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test setup that creates a temporary git repository with one commit
/// plus empty user-config and executable directories for the resolver
struct TestRepo {
    _temp_dir: TempDir,
    repo_path: PathBuf,
    user_dir: PathBuf,
    exe_dir: PathBuf,
    repo: Repository,
}

impl TestRepo {
    fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let repo_path = temp_dir.path().join("repo");
        let user_dir = temp_dir.path().join("user");
        let exe_dir = temp_dir.path().join("bin");
        for dir in [&repo_path, &user_dir, &exe_dir] {
            fs::create_dir_all(dir)?;
        }

        let repo = Repository::init(&repo_path)?;
        let mut config = repo.config()?;
        config.set_str("user.name", "Test User")?;
        config.set_str("user.email", "test@example.com")?;

        let test_repo = TestRepo {
            _temp_dir: temp_dir,
            repo_path,
            user_dir,
            exe_dir,
            repo,
        };
        test_repo.initial_commit()?;
        Ok(test_repo)
    }

    fn initial_commit(&self) -> Result<()> {
        fs::write(self.repo_path.join("test.txt"), "initial\n")?;

        let mut index = self.repo.index()?;
        index.add_path(Path::new("test.txt"))?;
        index.write()?;

        let signature = Signature::now("Test User", "test@example.com")?;
        let tree = self.repo.find_tree(index.write_tree()?)?;
        self.repo
            .commit(Some("HEAD"), &signature, &signature, "chore: init", &tree, &[])?;
        Ok(())
    }

    fn git(&self) -> Result<GitRepository> {
        GitRepository::open_at(&self.repo_path)
    }

    fn context(&self) -> Result<RepoContext> {
        let mut context = self.git()?.context();
        // Pin the root to the path the test wrote files under
        context.root = Some(self.repo_path.clone());
        Ok(context)
    }

    fn resolver(&self) -> ConfigResolver {
        ConfigResolver::new(
            Some(self.repo_path.clone()),
            Some(self.user_dir.clone()),
            Some(self.exe_dir.clone()),
        )
    }

    fn set_config(&self, key: &str, value: &str) -> Result<()> {
        self.repo.config()?.set_str(key, value)?;
        Ok(())
    }

    fn compose(&self, script: &str) -> Result<(String, String)> {
        let mut console = LineConsole::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let message = compose_message(&self.context()?, &self.resolver(), &mut console)?;
        let output = String::from_utf8(console.writer().clone())?;
        Ok((message, output))
    }
}

#[test]
fn test_default_rules_end_to_end() -> Result<()> {
    let test_repo = TestRepo::new()?;
    let (message, _) = test_repo.compose("feat\nhoge\nnew feature hoge!\n\n\n")?;
    assert_eq!(message, "feat(hoge): ✨new feature hoge!");
    Ok(())
}

#[test]
fn test_repository_rules_and_scope_history() -> Result<()> {
    let test_repo = TestRepo::new()?;
    fs::write(
        test_repo.repo_path.join(".cx.yaml"),
        "headerFormat: \"{{.type}}{{.scope_with_parens}}{{.bang}}: {{.description}}\"\n\
         types:\n  feat:\n    description: A new feature\n  fix:\n    description: A bug fix\n\
         denyAdlibType: true\nuseBreakingChange: true\n",
    )?;

    let scopes_path = test_repo.repo_path.join(".scope-history.json");
    let mut history = ScopeHistory::new();
    history.touch("scope1", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    persist_scope_history(&history, &scopes_path)?;

    let (message, output) = test_repo.compose(
        "wip\nfix\nhoge\nrepair parser\nhandles empty input\n\n\nold flag removed\n",
    )?;

    insta::assert_snapshot!(message, @r"
    fix(hoge)!: repair parser

    handles empty input
    BREAKING CHANGE: old flag removed
    ");
    assert!(output.contains("ad-lib type is not allowed"));

    let reloaded: ScopeHistory = serde_json::from_str(&fs::read_to_string(&scopes_path)?)?;
    assert_eq!(reloaded.scopes(), vec!["hoge", "scope1"]);
    Ok(())
}

#[test]
fn test_git_config_override_wins() -> Result<()> {
    let test_repo = TestRepo::new()?;
    fs::create_dir_all(test_repo.repo_path.join("conf"))?;
    fs::write(
        test_repo.repo_path.join("conf/rules.json"),
        r#"{"headerFormat": "[{{.type}}] {{.description}}"}"#,
    )?;
    fs::write(
        test_repo.repo_path.join(".cx.yaml"),
        "headerFormat: \"ignored {{.description}}\"\n",
    )?;
    test_repo.set_config("cx.rule", "conf/rules.json")?;

    let (message, _) = test_repo.compose("docs\n\ntypo\n\n\n")?;
    assert_eq!(message, "[docs] typo");
    Ok(())
}

#[test]
fn test_user_config_scopes_are_read_only() -> Result<()> {
    let test_repo = TestRepo::new()?;
    let user_scopes = test_repo.user_dir.join(".scope-history.json");
    let original = r#"{"shared": "2024-01-01T00:00:00Z"}"#;
    fs::write(&user_scopes, original)?;

    test_repo.compose("fix\nlocal\nrepair\n\n\n")?;

    assert_eq!(fs::read_to_string(&user_scopes)?, original);
    assert!(!test_repo.repo_path.join(".scope-history.json").exists());
    Ok(())
}

#[test]
fn test_malformed_rule_file_falls_back_to_defaults() -> Result<()> {
    let test_repo = TestRepo::new()?;
    fs::write(test_repo.repo_path.join(".cx.yaml"), "types: [unclosed\n")?;
    fs::write(
        test_repo.user_dir.join(".cx.yaml"),
        "headerFormat: \"user {{.description}}\"\n",
    )?;

    let (message, _) = test_repo.compose("fix\n\nrepair\n\n\n")?;
    assert_eq!(message, "fix: 🐛repair");
    Ok(())
}

#[test]
fn test_nothing_staged_stops_before_prompting() -> Result<()> {
    let test_repo = TestRepo::new()?;
    let git = test_repo.git()?;
    let command = CommitCommand {
        all: false,
        debug: false,
    };

    let mut console = LineConsole::new(Cursor::new(Vec::new()), Vec::new());
    let message = command.prepare_message(
        &git,
        &test_repo.context()?,
        &test_repo.resolver(),
        &mut console,
    )?;

    assert_eq!(message, None);
    assert_eq!(console.writer().as_slice(), b"no changes\n");
    Ok(())
}

#[test]
fn test_all_stages_tracked_changes_then_composes() -> Result<()> {
    let test_repo = TestRepo::new()?;
    fs::write(test_repo.repo_path.join("test.txt"), "changed\n")?;
    let git = test_repo.git()?;
    let command = CommitCommand {
        all: true,
        debug: false,
    };

    let script = "refactor\ncore\nsplit module\n\n\n";
    let mut console = LineConsole::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    let message = command.prepare_message(
        &git,
        &test_repo.context()?,
        &test_repo.resolver(),
        &mut console,
    )?;

    assert_eq!(message.as_deref(), Some("refactor(core): ♻️split module"));
    assert!(git.has_staged_changes()?);
    Ok(())
}

#[test]
fn test_debug_ignores_all_and_composes_without_changes() -> Result<()> {
    let test_repo = TestRepo::new()?;
    fs::write(test_repo.repo_path.join("test.txt"), "changed\n")?;
    let git = test_repo.git()?;
    let command = CommitCommand {
        all: true,
        debug: true,
    };

    let script = "chore\n\nbump\n\n\n";
    let mut console = LineConsole::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    let message = command.prepare_message(
        &git,
        &test_repo.context()?,
        &test_repo.resolver(),
        &mut console,
    )?;

    assert_eq!(message.as_deref(), Some("chore: bump"));
    assert!(!git.has_staged_changes()?);
    let output = String::from_utf8(console.writer().clone())?;
    assert!(output.starts_with("no changes\n"));
    Ok(())
}
