//! シナリオテスト（スタブのアダプタでユースケースを組み立てて動かす）

mod session_tests;
mod support;
