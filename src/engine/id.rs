use sha2::{Digest, Sha256};
use uuid::{Builder, Uuid};

use crate::{
    ast::SourceRange,
    interpreter::value::geometry::{Path, SketchGroup},
};

/// Version tag mixed into every hash. Bump it when the byte layout below
/// changes so that old and new ids never collide.
const ID_SCHEME: &[u8] = b"partscript/command-id/v1";

/// A deterministic identifier for an engine command and the object it
/// creates. It is a version 4 UUID whose random bits come from a digest.
pub type CommandId = Uuid;

/// One input that affects the geometry produced by a call.
///
/// Every standard library function lists its inputs explicitly; each variant
/// is hashed with its own type tag so that, for example, the number `1` and
/// the text `"1"` never produce the same bytes.
#[derive(Debug, Clone, Copy)]
pub enum SemanticInput<'a> {
    /// Distinguishes several ids derived from the same call, e.g. a path and
    /// its first segment.
    Kind(&'a str),
    /// A numeric argument.
    Number(f64),
    /// A string argument such as a segment name.
    Text(&'a str),
    /// An optional argument that was not supplied.
    Absent,
    /// The id of another engine object.
    Id(CommandId),
    /// A complete sketch: its id, every segment, position and rotation.
    Sketch(&'a SketchGroup),
}

/// Computes the deterministic id of a command.
///
/// The hash covers a version tag, the complete source text, the call's
/// source range and every semantic input, each length prefixed or type
/// tagged so that different input lists can never serialize to the same
/// bytes. Metadata chains are not hashed since they do not affect geometry.
///
/// # Parameters
/// - `code`: The complete source text of the pass.
/// - `range`: Range of the call issuing the command.
/// - `inputs`: Every input that affects the resulting geometry.
///
/// # Returns
/// The first 16 bytes of the SHA-256 digest, stamped as a version 4 UUID.
///
/// # Example
/// ```
/// use partscript::{
///     ast::SourceRange,
///     engine::{SemanticInput, command_id},
/// };
///
/// let range = SourceRange::new(0, 18);
/// let a = command_id("extrude(5, sketch)", range, &[SemanticInput::Number(5.0)]);
/// let b = command_id("extrude(5, sketch)", range, &[SemanticInput::Number(5.0)]);
/// let c = command_id("extrude(5, sketch)", range, &[SemanticInput::Number(6.0)]);
///
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// ```
#[must_use]
pub fn command_id(code: &str, range: SourceRange, inputs: &[SemanticInput<'_>]) -> CommandId {
    let mut hasher = IdHasher::default();
    hasher.bytes(ID_SCHEME);
    hasher.bytes(code.as_bytes());
    hasher.offset(range.start());
    hasher.offset(range.end());
    hasher.offset(inputs.len());
    for input in inputs {
        hasher.input(input);
    }
    hasher.finish()
}

/// Builds the canonical byte stream fed to SHA-256.
#[derive(Default)]
struct IdHasher {
    digest: Sha256,
}

impl IdHasher {
    fn tag(&mut self, tag: u8) {
        self.digest.update([tag]);
    }

    fn offset(&mut self, value: usize) {
        self.digest.update((value as u64).to_le_bytes());
    }

    fn bytes(&mut self, bytes: &[u8]) {
        self.offset(bytes.len());
        self.digest.update(bytes);
    }

    /// Hashes a float by its canonical bit pattern: `-0.0` hashes as `0.0`
    /// and every NaN hashes the same.
    fn number(&mut self, value: f64) {
        let canonical = if value == 0.0 {
            0.0_f64
        } else if value.is_nan() {
            f64::NAN
        } else {
            value
        };
        self.digest.update(canonical.to_bits().to_le_bytes());
    }

    fn numbers(&mut self, values: &[f64]) {
        for value in values {
            self.number(*value);
        }
    }

    fn id(&mut self, id: CommandId) {
        self.digest.update(id.as_bytes());
    }

    fn optional_text(&mut self, text: Option<&str>) {
        match text {
            Some(text) => {
                self.tag(1);
                self.bytes(text.as_bytes());
            },
            None => self.tag(0),
        }
    }

    fn path(&mut self, path: &Path) {
        self.id(path.id);
        self.optional_text(path.name.as_deref());
        self.numbers(&path.from);
        self.numbers(&path.to);
    }

    fn input(&mut self, input: &SemanticInput<'_>) {
        match input {
            SemanticInput::Kind(kind) => {
                self.tag(0x01);
                self.bytes(kind.as_bytes());
            },
            SemanticInput::Number(n) => {
                self.tag(0x02);
                self.number(*n);
            },
            SemanticInput::Text(text) => {
                self.tag(0x03);
                self.bytes(text.as_bytes());
            },
            SemanticInput::Absent => self.tag(0x05),
            SemanticInput::Id(id) => {
                self.tag(0x06);
                self.id(*id);
            },
            SemanticInput::Sketch(sketch) => {
                self.tag(0x07);
                self.id(sketch.id);
                self.numbers(&sketch.start);
                self.numbers(&sketch.position);
                self.numbers(&sketch.rotation);
                self.offset(sketch.value.len());
                for path in &sketch.value {
                    self.path(path);
                }
            },
        }
    }

    fn finish(self) -> CommandId {
        let digest = self.digest.finalize();
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        Builder::from_random_bytes(bytes).into_uuid()
    }
}
