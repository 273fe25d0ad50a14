use crate::command::{CommandIssued, CommandSource, SystemChat};
use bevy_app::{App, FixedPreUpdate, Plugin, Update};
use bevy_ecs::message::{MessageReader, MessageWriter};
use bevy_ecs::prelude::{ResMut, Resource};
use std::io::BufRead;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::{info, warn};

/// Reads command lines from stdin and prints console-bound chat.
pub struct ConsolePlugin;

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        let (send, recv) = unbounded_channel();
        std::thread::Builder::new()
            .name("console-reader".into())
            .spawn(move || {
                for line in std::io::stdin().lock().lines() {
                    let Ok(line) = line else {
                        break;
                    };
                    if send.send(line).is_err() {
                        break;
                    }
                }
            })
            .map_err(|e| warn!("Failed to start console reader: {e}"))
            .ok();

        app.insert_resource(ConsoleInput(recv));
        app.add_systems(FixedPreUpdate, read_console_commands);
        app.add_systems(Update, print_console_chat);
    }
}

#[derive(Resource)]
struct ConsoleInput(UnboundedReceiver<String>);

fn read_console_commands(mut input: ResMut<ConsoleInput>, mut writer: MessageWriter<CommandIssued>) {
    loop {
        let line = match input.0.try_recv() {
            Ok(line) => line,
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        };
        if line.trim().is_empty() {
            continue;
        }
        match CommandIssued::parse(CommandSource::Console, &line) {
            Ok(cmd) => {
                writer.write(cmd);
            }
            Err(e) => warn!("Ignoring console input {line:?}: {e}"),
        }
    }
}

fn print_console_chat(mut reader: MessageReader<SystemChat>) {
    reader
        .read()
        .filter(|msg| msg.recipient == CommandSource::Console)
        .for_each(|msg| info!("{}", msg.content));
}
