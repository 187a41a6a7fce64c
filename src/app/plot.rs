//! Region bar-plot rendering on top of the runtime.

use std::sync::OnceLock;

use mlua::Function;
use regex_lite::Regex;

use crate::app::error::Result;
use crate::app::runtime::RuntimeClient;

/// Query for the dataset's region column names, in column order.
pub const REGION_QUERY: &str = "return WorldPhones.regions";

/// Plot script compiled once per runtime. The region arrives as a bound
/// function argument; it is never concatenated into the source text.
const PLOT_FUNCTION: &str = r#"
return function(region)
  local series = WorldPhones.counts[region]
  if series == nil then
    error(("unknown region '%s'"):format(region), 0)
  end
  return svgplot.barplot(series, WorldPhones.years, {
    main = region,
    sub = "Data from AT&T (1961) The World's Telephones",
    ylab = "Number of Telephones (K)",
    xlab = "Year",
    theme = theme,
    width = 576,
    height = 288,
  })
end
"#;

/// Renders one region's bar chart to responsive SVG markup.
///
/// Requires a runtime with the `svgplot` and `datasets` libraries loaded and
/// a `theme` table set.
pub struct PlotRenderer {
    func: Function,
}

impl PlotRenderer {
    pub fn new(runtime: &RuntimeClient) -> Result<Self> {
        let func = runtime.compile_function(PLOT_FUNCTION, "region-plot")?;
        Ok(Self { func })
    }

    /// Render the plot for one region label and make it fill its container.
    pub fn render(&self, runtime: &RuntimeClient, region: &str) -> Result<String> {
        let svg = runtime.call_str(&self.func, region)?;
        Ok(responsive_svg(&svg))
    }
}

/// Replace the first fixed-unit width with a percentage and drop the first
/// fixed-unit height, so the image scales with its container.
pub fn responsive_svg(svg: &str) -> String {
    static WIDTH: OnceLock<Regex> = OnceLock::new();
    static HEIGHT: OnceLock<Regex> = OnceLock::new();
    let width = WIDTH.get_or_init(|| {
        Regex::new(r"width='\d+(\.\d+)?pt'").expect("static pattern")
    });
    let height = HEIGHT.get_or_init(|| {
        Regex::new(r" height='\d+(\.\d+)?pt'").expect("static pattern")
    });

    let svg = width.replace(svg, "width='100%'");
    height.replace(&svg, "").into_owned()
}
