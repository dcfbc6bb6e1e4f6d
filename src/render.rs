//! Render boundary: a [Scene] exposes the graph plus per-element callbacks, and a
//! [RenderAdapter] (force layout, canvas, terminal, JSON dump...) consumes it.

use std::io::Write;

use serde::Serialize;
use tracing::{instrument, trace};

use crate::encoder::{
  ARROW_LENGTH, LINK_COLOR, NodeSizing, SpeedPolicy, TransactionLookup, VisualEncoder,
};
use crate::error::GraphResult;
use crate::types::{GraphData, GraphSnapshot, NodeRole, TransferEdge, WalletNode};

/// Graph plus the callbacks a renderer queries per frame and per element.
pub struct Scene<'a> {
  pub graph: &'a GraphData,
  pub generation: u64,
  encoder: VisualEncoder<'a, dyn TransactionLookup + 'a>,
}

impl<'a> Scene<'a> {
  pub fn new(graph: &'a GraphData, lookup: &'a (dyn TransactionLookup + 'a)) -> Self {
    Self {
      graph,
      generation: 0,
      encoder: VisualEncoder::new(lookup),
    }
  }

  /// Scene over a snapshot, answering lookups from its precomputed index.
  pub fn from_snapshot(
    snapshot: &'a GraphSnapshot,
    speed_policy: SpeedPolicy,
    node_sizing: NodeSizing,
  ) -> Self {
    let lookup: &'a dyn TransactionLookup = &snapshot.index;
    Self {
      graph: &snapshot.graph,
      generation: snapshot.generation,
      encoder: VisualEncoder::new(lookup)
        .with_speed_policy(speed_policy)
        .with_node_sizing(node_sizing),
    }
  }

  pub fn with_speed_policy(mut self, policy: SpeedPolicy) -> Self {
    self.encoder = self.encoder.with_speed_policy(policy);
    self
  }

  pub fn with_node_sizing(mut self, sizing: NodeSizing) -> Self {
    self.encoder = self.encoder.with_node_sizing(sizing);
    self
  }

  pub fn node_label(&self, node: &WalletNode) -> String {
    self.encoder.node_label(node)
  }

  pub fn link_label(&self, link: &TransferEdge) -> String {
    self.encoder.link_label(link)
  }

  pub fn node_role(&self, node: &WalletNode) -> NodeRole {
    self.encoder.node_role(node)
  }

  pub fn node_color(&self, node: &WalletNode) -> &'static str {
    self.encoder.node_color(node)
  }

  pub fn node_size(&self, node: &WalletNode) -> f64 {
    self.encoder.node_size(node)
  }

  pub fn particle_speed(&self, link: &TransferEdge) -> f64 {
    self.encoder.particle_speed(link)
  }

  pub fn particle_width(&self, link: &TransferEdge) -> f64 {
    self.encoder.particle_width(link)
  }

  pub fn particle_color(&self, link: &TransferEdge) -> &'static str {
    self.encoder.particle_color(link)
  }

  pub fn arrow_color(&self, link: &TransferEdge) -> &'static str {
    self.encoder.arrow_color(link)
  }

  pub fn link_color(&self, _link: &TransferEdge) -> &'static str {
    LINK_COLOR
  }

  /// Evaluates every callback once into a plain, serializable frame.
  #[instrument(level = "trace", skip(self), fields(generation = self.generation))]
  pub fn frame(&self) -> SceneFrame {
    let nodes = self
      .graph
      .nodes
      .iter()
      .map(|n| NodeFrame {
        id: n.id.clone(),
        label: self.node_label(n),
        role: self.node_role(n),
        color: self.node_color(n),
        size: self.node_size(n),
        in_volume: n.in_volume,
        out_volume: n.out_volume,
        net_volume: n.net_volume(),
      })
      .collect();
    let links = self
      .graph
      .links
      .iter()
      .map(|l| LinkFrame {
        id: l.id.clone(),
        source: l.source.clone(),
        target: l.target.clone(),
        transaction_type: l.transaction_type.to_string(),
        label: self.link_label(l),
        color: self.link_color(l),
        particles: l.directed_particles,
        particle_speed: self.particle_speed(l),
        particle_width: self.particle_width(l),
        particle_color: self.particle_color(l),
        arrow_color: self.arrow_color(l),
        arrow_length: ARROW_LENGTH,
      })
      .collect();
    SceneFrame {
      generation: self.generation,
      nodes,
      links,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeFrame {
  pub id: String,
  pub label: String,
  pub role: NodeRole,
  pub color: &'static str,
  pub size: f64,
  pub in_volume: f64,
  pub out_volume: f64,
  pub net_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkFrame {
  pub id: String,
  pub source: String,
  pub target: String,
  pub transaction_type: String,
  pub label: String,
  pub color: &'static str,
  pub particles: u32,
  pub particle_speed: f64,
  pub particle_width: f64,
  pub particle_color: &'static str,
  pub arrow_color: &'static str,
  pub arrow_length: f64,
}

/// Fully evaluated scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneFrame {
  pub generation: u64,
  pub nodes: Vec<NodeFrame>,
  pub links: Vec<LinkFrame>,
}

/// Rendering capability the scene is handed to.
pub trait RenderAdapter {
  fn render(&mut self, scene: &Scene<'_>) -> GraphResult<()>;
}

/// Writes each scene as one JSON document (one line unless pretty).
pub struct JsonSceneAdapter<W: Write> {
  writer: W,
  pretty: bool,
}

impl<W: Write> JsonSceneAdapter<W> {
  pub fn new(writer: W) -> Self {
    Self {
      writer,
      pretty: false,
    }
  }

  pub fn pretty(mut self) -> Self {
    self.pretty = true;
    self
  }

  pub fn into_inner(self) -> W {
    self.writer
  }
}

impl<W: Write> RenderAdapter for JsonSceneAdapter<W> {
  fn render(&mut self, scene: &Scene<'_>) -> GraphResult<()> {
    let frame = scene.frame();
    if self.pretty {
      serde_json::to_writer_pretty(&mut self.writer, &frame)?;
    } else {
      serde_json::to_writer(&mut self.writer, &frame)?;
    }
    self.writer.write_all(b"\n")?;
    self.writer.flush()?;
    trace!(
      generation = frame.generation,
      nodes = frame.nodes.len(),
      links = frame.links.len(),
      "frame written"
    );
    Ok(())
  }
}
