//! Tests for the threaded window command loop.

use hexquill::config::WindowOptions;
use hexquill::editor::command::{Action, Command};
use hexquill::editor::error::WindowError;
use hexquill::editor::handle::WindowHandle;
use hexquill::editor::mode::EditorMode;
use hexquill::editor::position::{Position, Range};
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// A source whose bytes past `fail_from` cannot be read.
struct DamagedSource {
    inner: Cursor<Vec<u8>>,
    fail_from: u64,
}

impl Read for DamagedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.inner.position() + buf.len() as u64 > self.fail_from {
            return Err(io::Error::new(io::ErrorKind::Other, "bad sector"));
        }
        self.inner.read(buf)
    }
}

impl Seek for DamagedSource {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

fn open(bytes: Vec<u8>) -> (WindowHandle, Receiver<()>) {
    let (tx, rx) = mpsc::channel();
    let handle = WindowHandle::open(Cursor::new(bytes), "test", WindowOptions::default(), tx)
        .unwrap();
    (handle, rx)
}

#[test]
fn test_commands_apply_in_order() {
    let (handle, redraw) = open(vec![0; 32]);
    handle.set_size(8, 2).unwrap();

    handle.send(Command::normal(Action::CursorDown)).unwrap();
    handle
        .send(Command::normal(Action::CursorRight).with_count(3))
        .unwrap();
    handle.send(Command::normal(Action::Increment)).unwrap();
    for _ in 0..3 {
        redraw.recv().unwrap();
    }

    let state = handle.state().unwrap();
    assert_eq!(state.cursor, 11);
    assert_eq!(state.offset, 0);
    assert_eq!(state.byte_at(11), Some(1));
    assert!(state.is_edited(11));
    handle.close().unwrap();
}

#[test]
fn test_one_redraw_per_command() {
    let (handle, redraw) = open(vec![0; 4]);
    for _ in 0..5 {
        handle.send(Command::normal(Action::CursorNext)).unwrap();
    }
    for _ in 0..5 {
        redraw.recv().unwrap();
    }
    assert!(redraw.try_recv().is_err());
    handle.close().unwrap();
}

#[test]
fn test_concurrent_senders_are_serialized() {
    let (handle, redraw) = open(vec![0; 4]);

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..25 {
                    handle.send(Command::normal(Action::Increment)).unwrap();
                }
            });
        }
        scope.spawn(|| {
            let mut last = 0u8;
            for _ in 0..50 {
                let byte = handle.state().unwrap().byte_at(0).unwrap();
                assert!(byte >= last);
                last = byte;
            }
        });
    });
    for _ in 0..100 {
        redraw.recv().unwrap();
    }

    let mut out = Vec::new();
    handle.write_to(None, &mut out).unwrap();
    assert_eq!(out, vec![100, 0, 0, 0]);
    handle.close().unwrap();
}

#[test]
fn test_io_error_does_not_stop_loop() {
    let (tx, redraw) = mpsc::channel();
    let source = DamagedSource {
        inner: Cursor::new(vec![b'a'; 64]),
        fail_from: 32,
    };
    let handle = WindowHandle::open(source, "damaged", WindowOptions::default(), tx).unwrap();
    handle.set_size(4, 1).unwrap();

    handle
        .send(Command::normal(Action::Search {
            pattern: "zz".to_string(),
            forward: true,
        }))
        .unwrap();
    redraw.recv().unwrap();
    assert_eq!(handle.state().unwrap().cursor, 0);

    handle.send(Command::normal(Action::CursorNext)).unwrap();
    redraw.recv().unwrap();
    assert_eq!(handle.state().unwrap().cursor, 1);
    handle.close().unwrap();
}

#[test]
fn test_missing_selection_does_not_stop_loop() {
    let (handle, redraw) = open(vec![0; 4]);
    handle
        .send(Command::normal(Action::CursorGoto(Range::at(
            Position::VisualStart(0),
        ))))
        .unwrap();
    redraw.recv().unwrap();

    handle.send(Command::normal(Action::CursorNext)).unwrap();
    redraw.recv().unwrap();
    assert_eq!(handle.state().unwrap().cursor, 1);
    handle.close().unwrap();
}

#[test]
fn test_internal_error_closes_window() {
    let (handle, redraw) = open(vec![0; 4]);
    handle
        .send(Command::new(Action::Redo, EditorMode::Visual))
        .unwrap();
    assert!(redraw.recv().is_err());
    assert!(matches!(handle.close(), Err(WindowError::Internal(_))));
}

#[test]
fn test_write_selection_through_handle() {
    let (handle, redraw) = open(b"0123456789".to_vec());
    handle
        .send(Command::normal(Action::CursorGoto(Range::at(
            Position::Absolute(3),
        ))))
        .unwrap();
    handle.send(Command::normal(Action::StartVisual)).unwrap();
    handle
        .send(Command::new(Action::CursorRight, EditorMode::Visual).with_count(2))
        .unwrap();
    for _ in 0..3 {
        redraw.recv().unwrap();
    }

    let mut out = Vec::new();
    let written = handle.write_to(Some(&Range::visual()), &mut out).unwrap();
    assert_eq!(written, 3);
    assert_eq!(out, b"345");
    handle.close().unwrap();
}

#[test]
fn test_drop_ends_command_loop() {
    let (handle, redraw) = open(vec![0; 4]);
    handle.send(Command::normal(Action::CursorNext)).unwrap();
    drop(handle);

    // The queued command still runs before the loop exits
    assert!(redraw.recv().is_ok());
    assert!(redraw.recv().is_err());
}
