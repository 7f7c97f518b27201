use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;

type Sample = Buffered<Decoder<BufReader<File>>>;

/// Best-effort sound effects. Any failure — no audio device, missing
/// files, playback error — degrades to silence, never to an error.
pub struct AudioManager {
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
    fire: Option<Sample>,
    explosion: Option<Sample>,
}

impl AudioManager {
    pub fn new() -> Self {
        match OutputStream::try_default() {
            Ok((stream, stream_handle)) => Self {
                _stream: Some(stream),
                stream_handle: Some(stream_handle),
                fire: load_sample("assets/sounds/laser.wav"),
                explosion: load_sample("assets/sounds/explosion.wav"),
            },
            Err(err) => {
                eprintln!("Warning: failed to initialize audio: {err}");
                Self {
                    _stream: None,
                    stream_handle: None,
                    fire: None,
                    explosion: None,
                }
            }
        }
    }

    pub fn play_fire(&self) {
        self.play(&self.fire, 0.2);
    }

    pub fn play_explosion(&self) {
        self.play(&self.explosion, 0.3);
    }

    fn play(&self, sample: &Option<Sample>, volume: f32) {
        let (Some(handle), Some(sample)) = (&self.stream_handle, sample) else {
            return;
        };
        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(volume);
            // Cloning a buffered source only clones references
            sink.append(sample.clone());
            sink.detach();
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

fn load_sample(path: &str) -> Option<Sample> {
    let file = File::open(path).ok()?;
    let source = Decoder::new(BufReader::new(file)).ok()?;
    Some(source.buffered())
}
