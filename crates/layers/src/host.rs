use foundation::LatLon;

use crate::markers::MarkerIcon;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// The live map the markers are attached to (Leaflet, Cesium, ...).
pub trait MapHost {
    fn add_marker(&mut self, position: LatLon, icon: &MarkerIcon) -> MarkerHandle;
    fn remove_marker(&mut self, marker: MarkerHandle);
    fn set_icon(&mut self, marker: MarkerHandle, icon: &MarkerIcon);
    fn zoom(&self) -> f64;
}
