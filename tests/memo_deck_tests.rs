// Tests for the memo list and the deck that ties recording and playback together

mod common;

use anyhow::Result;
use common::{calls, MockCapture, MockPlayback};
use voice_memos::{
    AudioHandle, AudioSlots, Config, Memo, MemoDeck, MemoStore, PlaybackState, SessionError,
    WaveformNormalizer,
};

#[test]
fn test_store_orders_newest_first() {
    let normalizer = WaveformNormalizer::default();
    let mut store = MemoStore::new();
    assert!(store.is_empty());

    let first = store.insert(Memo::new(AudioHandle::new("a"), vec![], &normalizer));
    let second = store.insert(Memo::new(AudioHandle::new("b"), vec![], &normalizer));

    assert_eq!(store.len(), 2);
    let uris: Vec<&str> = store.iter().map(|m| m.audio_handle().uri()).collect();
    assert_eq!(uris, vec!["b", "a"]);
    assert_eq!(store.latest().map(|m| m.id()), Some(second.id()));
    assert_eq!(store.get(first.id()).map(|m| m.id()), Some(first.id()));
    assert!(store.get(uuid::Uuid::new_v4()).is_none());
}

fn deck(capture: &MockCapture, playback: &MockPlayback) -> MemoDeck {
    MemoDeck::new(
        &Config::default(),
        AudioSlots::new(),
        capture.backend(),
        playback.backend(),
    )
}

#[tokio::test]
async fn test_toggle_recording_stores_memo() -> Result<()> {
    let capture = MockCapture::new();
    let playback = MockPlayback::new();
    let mut deck = deck(&capture, &playback);

    assert!(deck.toggle_recording().await?.is_none());
    assert!(deck.recorder().is_recording());
    capture.emit(Some(-20.0));
    capture.emit(None);

    let memo = deck.toggle_recording().await?.expect("memo");
    assert_eq!(memo.metering(), &[-20.0, -100.0]);
    assert_eq!(deck.store().len(), 1);
    assert_eq!(deck.store().latest().map(|m| m.id()), Some(memo.id()));
    Ok(())
}

#[tokio::test]
async fn test_selecting_another_memo_unloads_the_previous_one_first() -> Result<()> {
    let capture = MockCapture::new();
    let playback = MockPlayback::new();
    let mut deck = deck(&capture, &playback);

    deck.toggle_recording().await?;
    let first = deck.toggle_recording().await?.expect("first memo");
    deck.toggle_recording().await?;
    let second = deck.toggle_recording().await?.expect("second memo");

    deck.select(first.id()).await?;
    deck.toggle_playback().await?;
    assert_eq!(deck.player().state(), PlaybackState::Playing);

    deck.select(second.id()).await?;
    assert_eq!(deck.player().state(), PlaybackState::Loaded);
    assert_eq!(deck.player().memo().map(|m| m.id()), Some(second.id()));

    assert_eq!(
        calls(&playback.log),
        vec![
            "open mock://recording.m4a",
            "play",
            "close",
            "open mock://recording.m4a",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_reselecting_the_loaded_memo_keeps_playing() -> Result<()> {
    let capture = MockCapture::new();
    let playback = MockPlayback::new();
    let mut deck = deck(&capture, &playback);

    deck.toggle_recording().await?;
    let memo = deck.toggle_recording().await?.expect("memo");

    deck.select(memo.id()).await?;
    deck.toggle_playback().await?;
    deck.select(memo.id()).await?;

    assert_eq!(deck.player().state(), PlaybackState::Playing);
    assert_eq!(calls(&playback.log), vec!["open mock://recording.m4a", "play"]);
    Ok(())
}

#[tokio::test]
async fn test_selecting_unknown_memo_fails() {
    let capture = MockCapture::new();
    let playback = MockPlayback::new();
    let mut deck = deck(&capture, &playback);

    let err = deck.select(uuid::Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, SessionError::LoadError(_)));
    assert_eq!(deck.player().state(), PlaybackState::Unloaded);
}

#[tokio::test]
async fn test_playback_while_recording() -> Result<()> {
    let capture = MockCapture::new();
    let playback = MockPlayback::new();
    let mut deck = deck(&capture, &playback);

    deck.toggle_recording().await?;
    let memo = deck.toggle_recording().await?.expect("memo");

    // Recording and playback slots are independent
    deck.toggle_recording().await?;
    deck.select(memo.id()).await?;
    deck.toggle_playback().await?;
    assert!(deck.recorder().is_recording());
    assert_eq!(deck.player().state(), PlaybackState::Playing);
    Ok(())
}

#[tokio::test]
async fn test_decks_sharing_slots_record_one_at_a_time() -> Result<()> {
    let slots = AudioSlots::new();
    let first_capture = MockCapture::new();
    let second_capture = MockCapture::new();
    let mut first = MemoDeck::new(
        &Config::default(),
        slots.clone(),
        first_capture.backend(),
        MockPlayback::new().backend(),
    );
    let mut second = MemoDeck::new(
        &Config::default(),
        slots.clone(),
        second_capture.backend(),
        MockPlayback::new().backend(),
    );

    first.toggle_recording().await?;
    let err = second.toggle_recording().await.unwrap_err();
    assert!(matches!(err, SessionError::DeviceUnavailable(_)));
    assert!(!second.recorder().is_recording());
    assert!(calls(&second_capture.log).is_empty());

    first.toggle_recording().await?;
    second.toggle_recording().await?;
    assert!(second.recorder().is_recording());
    Ok(())
}
