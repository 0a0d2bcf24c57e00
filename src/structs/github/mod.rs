pub mod github_pull_request;
