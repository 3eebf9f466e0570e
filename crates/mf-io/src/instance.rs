//! Loading and saving `link.csv` / `service.csv` instance directories.

use std::path::{Path, PathBuf};

use mf_core::{Scalar, VertexId};
use mf_flow::{CAPACITY, COST, Demand, MCF_FEATURE_DIM, Mcf};
use mf_graph::FeatureGraph;
use tracing::{debug, info};

use crate::csv::{RowReader, records};
use crate::error::{IoError, IoResult};
use crate::options::{EdgeDirection, Format, LoadOptions};

pub const LINK_FILE: &str = "link.csv";
pub const SERVICE_FILE: &str = "service.csv";

const LINK_HEADER: &str = "# LinkId,srcNodeId,dstNodeId,capacity,cost,latency";
const SERVICE_HEADER: &str = "# DemandId,srcNodeId,dstNodeId,amount,latency";

/// Instance type produced by [`load`].
pub type Instance = Mcf<u32, f64>;

/// True when `dir` holds both instance files.
pub fn is_instance_dir(dir: impl AsRef<Path>) -> bool {
    let dir = dir.as_ref();
    dir.join(LINK_FILE).is_file() && dir.join(SERVICE_FILE).is_file()
}

fn read_file(path: &Path) -> IoResult<String> {
    if !path.is_file() {
        return Err(IoError::MissingFile(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Parse link rows into a graph with at least `nv` vertices.
fn parse_links(path: &Path, content: &str, nv: usize) -> IoResult<FeatureGraph<u32, f64>> {
    let mut graph = FeatureGraph::with_vertices(nv, MCF_FEATURE_DIM);
    for record in records(content) {
        let row = RowReader::new(path, &record, 5)?;
        let src = row.vertex(1)?;
        let dst = row.vertex(2)?;
        let capacity = row.value(3, "capacity")?;
        let cost = row.value(4, "cost")?;
        if !graph.add_edge(src, dst, [cost, capacity])? {
            debug!(line = record.line, src, dst, "duplicate link ignored");
        }
    }
    Ok(graph)
}

fn read_services(path: &Path) -> IoResult<Vec<Demand<u32, f64>>> {
    let content = read_file(path)?;
    records(&content)
        .iter()
        .map(|record| {
            let row = RowReader::new(path, record, 4)?;
            Ok(Demand::new(row.vertex(1)?, row.vertex(2)?, row.value(3, "amount")?))
        })
        .collect()
}

/// Read the instance stored in `dir`.
pub fn load(dir: impl AsRef<Path>, options: &LoadOptions) -> IoResult<Instance> {
    let dir = dir.as_ref();
    let (mut graph, demands) = match options.format {
        Format::Csv => {
            let link_path = dir.join(LINK_FILE);
            let links = read_file(&link_path)?;
            let demands = read_services(&dir.join(SERVICE_FILE))?;
            // vertices that only appear in demands still belong to the graph
            let nv = demands
                .iter()
                .flat_map(|d| [d.src(), d.dst()])
                .max()
                .map_or(0, |v| v as usize);
            (parse_links(&link_path, &links, nv)?, demands)
        }
    };
    if options.edge_dir == EdgeDirection::Double {
        graph.double_edges();
    }
    let mcf = Mcf::new(graph, demands)?;
    info!(
        dir = %dir.display(),
        edge_dir = %options.edge_dir,
        nv = mcf.nv(),
        ne = mcf.ne(),
        nk = mcf.nk(),
        "loaded instance"
    );
    Ok(mcf)
}

/// Write `mcf` into `dir`, creating it if needed.
///
/// Returns the paths of the link and service files.
pub fn save<V: VertexId, F: Scalar>(
    mcf: &Mcf<V, F>,
    dir: impl AsRef<Path>,
) -> IoResult<(PathBuf, PathBuf)> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut links = String::from(LINK_HEADER);
    links.push('\n');
    for (i, edge) in mcf.edges().enumerate() {
        let values = edge.feature();
        links.push_str(&format!(
            "{},{},{},{},{},0\n",
            i + 1,
            edge.src,
            edge.dst,
            values[CAPACITY],
            values[COST]
        ));
    }

    let mut services = String::from(SERVICE_HEADER);
    services.push('\n');
    for (i, demand) in mcf.demands().iter().enumerate() {
        services.push_str(&format!(
            "{},{},{},{},0\n",
            i + 1,
            demand.src(),
            demand.dst(),
            demand.amount()
        ));
    }

    let link_path = dir.join(LINK_FILE);
    let service_path = dir.join(SERVICE_FILE);
    std::fs::write(&link_path, links)?;
    std::fs::write(&service_path, services)?;
    info!(dir = %dir.display(), ne = mcf.ne(), nk = mcf.nk(), "saved instance");
    Ok((link_path, service_path))
}
