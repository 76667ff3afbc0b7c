//! The vendor registry — which tickers the dashboard tracks.
//!
//! The registry is ordered: the dashboard renders rows, CSV lines and chart
//! series in registry order. On the wire it is a JSON object mapping symbol to
//! display name, written and read in that same order. A sequence of
//! `{symbol, name}` tables is also accepted so it can come from a config file.

use std::fmt;

use serde::{
  Deserialize, Deserializer, Serialize, Serializer,
  de::{MapAccess, SeqAccess, Visitor},
  ser::SerializeMap,
};

/// One tracked company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
  pub symbol: String,
  pub name:   String,
}

impl Vendor {
  pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
    Self { symbol: symbol.into(), name: name.into() }
  }
}

/// Ordered symbol → display-name mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorRegistry {
  vendors: Vec<Vendor>,
}

impl VendorRegistry {
  /// Build a registry; a repeated symbol keeps its first position and takes
  /// the last name given for it.
  pub fn new(vendors: impl IntoIterator<Item = Vendor>) -> Self {
    let mut out: Vec<Vendor> = Vec::new();
    for vendor in vendors {
      match out.iter_mut().find(|v| v.symbol == vendor.symbol) {
        Some(existing) => existing.name = vendor.name,
        None => out.push(vendor),
      }
    }
    Self { vendors: out }
  }

  pub fn iter(&self) -> impl Iterator<Item = &Vendor> {
    self.vendors.iter()
  }

  pub fn len(&self) -> usize {
    self.vendors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vendors.is_empty()
  }

  pub fn name_of(&self, symbol: &str) -> Option<&str> {
    self
      .vendors
      .iter()
      .find(|v| v.symbol == symbol)
      .map(|v| v.name.as_str())
  }
}

impl Default for VendorRegistry {
  /// Sensor suppliers (TEL, ST) followed by materials suppliers (DD, CE, LYB).
  fn default() -> Self {
    Self::new([
      Vendor::new("TEL", "TE Connectivity"),
      Vendor::new("ST", "Sensata Technologies"),
      Vendor::new("DD", "DuPont de Nemours"),
      Vendor::new("CE", "Celanese"),
      Vendor::new("LYB", "LyondellBasell"),
    ])
  }
}

impl<'a> IntoIterator for &'a VendorRegistry {
  type Item = &'a Vendor;
  type IntoIter = std::slice::Iter<'a, Vendor>;

  fn into_iter(self) -> Self::IntoIter {
    self.vendors.iter()
  }
}

impl Serialize for VendorRegistry {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.vendors.len()))?;
    for v in &self.vendors {
      map.serialize_entry(&v.symbol, &v.name)?;
    }
    map.end()
  }
}

impl<'de> Deserialize<'de> for VendorRegistry {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct RegistryVisitor;

    impl<'de> Visitor<'de> for RegistryVisitor {
      type Value = VendorRegistry;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of symbol to name or a list of {symbol, name}")
      }

      fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut vendors = Vec::new();
        while let Some((symbol, name)) = access.next_entry::<String, String>()? {
          vendors.push(Vendor { symbol, name });
        }
        Ok(VendorRegistry::new(vendors))
      }

      fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut vendors = Vec::new();
        while let Some(vendor) = access.next_element::<Vendor>()? {
          vendors.push(vendor);
        }
        Ok(VendorRegistry::new(vendors))
      }
    }

    deserializer.deserialize_any(RegistryVisitor)
  }
}
