use crate::domain::Version;
use crate::error::{AutoVersionError, Result};
use crate::git::{branch_refspec, relative_to, tag_refspec, CommitInfo, TAGS_FETCH_REFSPEC};
use git2::{Oid, Repository as Git2Repo, Sort};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Commits in `from..to`, oldest first
    pub fn commits_between(&self, from: &str, to: &str) -> Result<Vec<CommitInfo>> {
        let from_oid = self.repo.revparse_single(from)?.peel_to_commit()?.id();
        let to_oid = self.repo.revparse_single(to)?.peel_to_commit()?.id();

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(to_oid)?;
        revwalk.hide(from_oid)?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            let author = commit.author();

            commits.push(CommitInfo {
                hash: oid.to_string(),
                summary: commit.summary().unwrap_or_default().to_string(),
                email: author.email().unwrap_or_default().to_string(),
            });
        }

        Ok(commits)
    }

    fn tags_by_commit(&self) -> Result<HashMap<Oid, Vec<String>>> {
        let mut tags: HashMap<Oid, Vec<String>> = HashMap::new();
        for name in self.repo.tag_names(None)?.iter().flatten() {
            let reference = match self.repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(reference) => reference,
                Err(_) => continue,
            };
            // annotated and lightweight tags both peel to the tagged commit
            if let Ok(commit) = reference.peel_to_commit() {
                tags.entry(commit.id()).or_default().push(name.to_string());
            }
        }
        Ok(tags)
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(AutoVersionError::remote("HEAD is detached, cannot push branch"));
        }
        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| AutoVersionError::remote("Current branch name is not valid UTF-8"))
    }

    fn push(&self, remote_name: &str, refspec: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|e| {
            AutoVersionError::remote(format!("Cannot find remote '{}': {}", remote_name, e))
        })?;

        let mut callbacks = remote_callbacks();
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "Remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        remote
            .push(&[refspec], Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => {
                    AutoVersionError::remote(format!("Network error during push: {}", e))
                }
                _ => AutoVersionError::remote(format!("Push of '{}' failed: {}", refspec, e)),
            })
    }
}

/// Credential callbacks trying SSH keys from ~/.ssh, then the agent, then defaults
fn remote_callbacks<'a>() -> git2::RemoteCallbacks<'a> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");
        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }
            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }
        git2::Cred::default()
    });
    callbacks
}

impl super::Repository for Git2Repository {
    fn fetch_tags(&self, remote_name: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|e| {
            AutoVersionError::remote(format!("Cannot find remote '{}': {}", remote_name, e))
        })?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks());

        remote
            .fetch(&[TAGS_FETCH_REFSPEC], Some(&mut fetch_options), None)
            .map_err(|e| {
                AutoVersionError::remote(format!(
                    "Failed to fetch tags from '{}': {}",
                    remote_name, e
                ))
            })
    }

    fn latest_tag(&self) -> Result<String> {
        let head = match self.repo.head() {
            Ok(head) => head.peel_to_commit()?.id(),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
                return Err(AutoVersionError::NoTagFound)
            }
            Err(e) => return Err(e.into()),
        };

        let tags = self.tags_by_commit()?;
        if tags.is_empty() {
            return Err(AutoVersionError::NoTagFound);
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head)?;

        for oid in revwalk {
            let oid = oid?;
            if let Some(names) = tags.get(&oid) {
                return Ok(pick_tag(names));
            }
        }

        Err(AutoVersionError::NoTagFound)
    }

    fn list_commit_subjects(&self, from: &str, to: &str) -> Result<Vec<String>> {
        Ok(self
            .commits_between(from, to)?
            .iter()
            .map(CommitInfo::log_line)
            .collect())
    }

    fn create_tag(&self, tag: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo.tag_lightweight(tag, head.as_object(), false)?;
        Ok(())
    }

    fn delete_tag(&self, tag: &str) -> Result<()> {
        self.repo.tag_delete(tag)?;
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.push(remote, &tag_refspec(tag))
    }

    fn push_branch(&self, remote: &str) -> Result<String> {
        let branch_name = self.current_branch()?;
        self.push(remote, &branch_refspec(&branch_name))?;

        let upstream = format!("{}/{}", remote, branch_name);
        let mut branch = self
            .repo
            .find_branch(&branch_name, git2::BranchType::Local)?;
        if let Err(e) = branch.set_upstream(Some(&upstream)) {
            tracing::warn!(branch = %branch_name, error = %e, "could not set upstream");
        }

        Ok(branch_name)
    }

    fn add_and_commit(&self, paths: &[PathBuf], message: &str) -> Result<()> {
        let root = self.workdir()?;
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(&relative_to(&root, path))?;
        }
        index.write()?;

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;

        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        Ok(())
    }

    fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| git2::Error::from_str("repository has no working directory").into())
    }
}

/// Among tags on one commit prefer the highest parseable version
fn pick_tag(names: &[String]) -> String {
    names
        .iter()
        .filter_map(|name| Version::parse(name).ok().map(|v| (v, name)))
        .max_by_key(|(v, _)| (v.major, v.minor, v.release))
        .map(|(_, name)| name.clone())
        .or_else(|| names.iter().min().cloned())
        .unwrap_or_default()
}
