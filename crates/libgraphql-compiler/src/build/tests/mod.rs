mod runner_tests;
mod watcher_tests;
