use crate::bridge::model::VisualizationModel;
use anyhow::Result;
use magnocore::prelude::CycleOutput;
use std::{
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use tokio::sync::watch;

/// Consumer-side stand-in for the renderer and chart: keeps the latest
/// visualization snapshot, fed from the pipeline's emitter on its own
/// thread so presentation can never stall the tick loop.
pub struct GuiBridge {
    state: Arc<RwLock<VisualizationModel>>,
}

impl GuiBridge {
    pub fn new(mut feed: watch::Receiver<Option<CycleOutput>>) -> Self {
        let state = Arc::new(RwLock::new(VisualizationModel::default()));
        let state_for_consumer = state.clone();

        thread::spawn(move || {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                while feed.changed().await.is_ok() {
                    let output = feed.borrow_and_update().clone();
                    if let Some(output) = output {
                        let mut guard = state_for_consumer.write().unwrap();
                        guard.cycles += 1;
                        guard.peaks = output.peaks;
                        guard.position = Some(output.position);
                        println!(
                            "[GUI] cycle {} -> position ({:.3}, {:.3}, {:.3})",
                            guard.cycles,
                            output.position.x,
                            output.position.y,
                            output.position.z
                        );
                    }
                }
            });
        });

        Self { state }
    }

    pub fn publish(&self, model: &VisualizationModel) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[GUI] peak set of {}, cycles seen: {}",
            guard.peaks.len(),
            guard.cycles
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> VisualizationModel {
        self.state.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magnocore::emitter::Emitter;
    use magnocore::prelude::Position;
    use std::time::Duration;

    #[test]
    fn gui_bridge_publish_updates_state() {
        let emitter = Emitter::new();
        let gui = GuiBridge::new(emitter.subscribe());
        let model = VisualizationModel {
            cycles: 3,
            peaks: vec![0.5, 8.0, 27.0, 64.0],
            position: Some(Position {
                x: 0.25,
                y: 0.14,
                z: 0.0,
            }),
        };
        gui.publish(&model).unwrap();
        assert_eq!(gui.snapshot().cycles, 3);
    }

    #[test]
    fn gui_bridge_consumes_emitted_cycles() {
        let emitter = Emitter::new();
        let gui = GuiBridge::new(emitter.subscribe());
        emitter.publish(CycleOutput {
            peaks: vec![0.5, 8.0, 27.0, 64.0],
            position: Position {
                x: 0.25,
                y: 0.14,
                z: 0.0,
            },
        });

        // The consumer runs on its own thread; poll briefly.
        for _ in 0..100 {
            if gui.snapshot().cycles > 0 {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        let snapshot = gui.snapshot();
        assert_eq!(snapshot.cycles, 1);
        assert_eq!(snapshot.peaks.len(), 4);
    }
}
