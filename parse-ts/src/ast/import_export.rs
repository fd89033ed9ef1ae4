use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// One entry of `export { local as exported }`. Both names are always set,
/// even when no explicit alias was written; a bare `export { x }` resolves to
/// `local == exported == "x"`. This keeps downstream matching free of
/// implicit-alias special cases.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportName {
  #[drive(skip)]
  pub local: String,
  #[drive(skip)]
  pub exported: String,
}

/// One entry of `import { imported as local }`; same always-set convention
/// as [`ExportName`].
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportName {
  #[drive(skip)]
  pub imported: String,
  #[drive(skip)]
  pub local: String,
}
