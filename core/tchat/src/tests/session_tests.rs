use super::support::{bundle, Setup, Shown};
use crate::domain::{ContentFingerprint, SessionEvent};

#[test]
fn test_content_change_resets_history() {
    let (mut chat, _h) = Setup::default().build();
    chat.handle(SessionEvent::UploadChanged(bundle(&[("a.txt", "one")])))
        .unwrap();
    chat.handle(SessionEvent::PromptSubmitted("Q1".to_string()))
        .unwrap();
    assert_eq!(chat.session().len(), 2);

    let changed = bundle(&[("a.txt", "one"), ("b.txt", "two")]);
    let expected = changed.combined_text().fingerprint();
    chat.handle(SessionEvent::UploadChanged(changed)).unwrap();

    assert!(chat.session().is_empty());
    assert_eq!(chat.session().fingerprint(), Some(&expected));
}

#[test]
fn test_same_content_keeps_history() {
    let (mut chat, h) = Setup::default().build();
    let b = bundle(&[("a.txt", "one")]);
    chat.handle(SessionEvent::UploadChanged(b.clone())).unwrap();
    chat.handle(SessionEvent::PromptSubmitted("Q1".to_string()))
        .unwrap();
    h.presenter.clear();

    chat.handle(SessionEvent::UploadChanged(b)).unwrap();

    assert_eq!(chat.session().len(), 2);
    // 再表示: 見出しの後に履歴全体
    let messages: Vec<_> = h
        .presenter
        .shown()
        .into_iter()
        .filter(|s| matches!(s, Shown::Message(_)))
        .collect();
    assert_eq!(messages.len(), 2);
}

#[test]
fn test_reorder_resets_history() {
    let (mut chat, _h) = Setup::default().build();
    chat.handle(SessionEvent::UploadChanged(bundle(&[("a.txt", "1"), ("b.txt", "2")])))
        .unwrap();
    chat.handle(SessionEvent::PromptSubmitted("Q1".to_string()))
        .unwrap();

    chat.handle(SessionEvent::UploadChanged(bundle(&[("b.txt", "2"), ("a.txt", "1")])))
        .unwrap();
    assert!(chat.session().is_empty());
}

#[test]
fn test_returning_to_earlier_content_does_not_restore_history() {
    let (mut chat, h) = Setup::default().build();
    let first = bundle(&[("a.txt", "1")]);
    chat.handle(SessionEvent::UploadChanged(first.clone())).unwrap();
    chat.handle(SessionEvent::PromptSubmitted("Q1".to_string()))
        .unwrap();
    chat.handle(SessionEvent::UploadChanged(bundle(&[("a.txt", "2")])))
        .unwrap();
    chat.handle(SessionEvent::UploadChanged(first.clone())).unwrap();

    assert!(chat.session().is_empty());
    assert_eq!(
        chat.session().fingerprint(),
        Some(&ContentFingerprint::of(first.combined_text().as_str()))
    );
    // キャッシュは作り直さない
    assert_eq!(h.provider.cache_calls(), 2);
}
