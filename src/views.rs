//! Stateless renderers that lay out view models as markup.

use crate::config::CHART_CANVAS_ID;
use cropwise::series::ChartMode;
use cropwise::view_model::{
    AverageCards, CurrentConditions, DayCard, ForecastView, MarketView, RecordColumns, RecordRow,
    SummaryCards, VideoCard,
};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

// ──────────────────────────────────────────────────────────────────────────────
// Forecast

pub fn render_forecast(
    view: &ForecastView,
    mode: ChartMode,
    on_mode_change: Callback<ChartMode>,
) -> Html {
    let p = &view.prediction;
    let onchange = Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        match select.value().parse::<ChartMode>() {
            Ok(mode) => on_mode_change.emit(mode),
            Err(err) => log::warn!("{}", err),
        }
    });

    html! {
        <div class="forecast-results">
            <div class="prediction-card">
                <h3>{ "🎯 Predicted Price" }</h3>
                <div class="prediction-price">{ p.price.clone() }</div>
                <div class="prediction-unit">{ "per quintal" }</div>
                <div class="prediction-meta">
                    <span>{ format!("📅 {}", p.date) }</span>
                    <span>{ format!("🌾 {}", p.commodity) }</span>
                    <span>{ format!("📍 {}", p.district) }</span>
                </div>
            </div>

            <div class="chart-card">
                <div class="chart-header">
                    <h3>{ "📈 Price Trend" }</h3>
                    <select class="chart-mode" {onchange}>
                        { for ChartMode::ALL.iter().map(|m| html! {
                            <option value={m.as_str()} selected={*m == mode}>{ m.label() }</option>
                        }) }
                    </select>
                </div>
                <div class="chart-container">
                    <canvas id={CHART_CANVAS_ID}></canvas>
                </div>
            </div>

            { view.summary.as_ref().map(render_summary).unwrap_or_default() }
        </div>
    }
}

fn render_summary(s: &SummaryCards) -> Html {
    let change_class = classes!("summary-value", if s.rising { "positive" } else { "negative" });
    html! {
        <div class="summary-grid">
            <div class="summary-card">
                <div class="summary-label">{ "Current Price" }</div>
                <div class="summary-value">{ s.current.clone() }</div>
            </div>
            <div class="summary-card">
                <div class="summary-label">{ "Predicted Average" }</div>
                <div class="summary-value">{ s.average.clone() }</div>
            </div>
            <div class="summary-card">
                <div class="summary-label">{ "Price Range" }</div>
                <div class="summary-value">{ s.range.clone() }</div>
            </div>
            <div class="summary-card">
                <div class="summary-label">{ "Trend" }</div>
                <div class={classes!("summary-value", s.trend.css_class())}>{ s.trend.as_str() }</div>
                <div class={change_class}>{ s.change.clone() }</div>
            </div>
        </div>
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Market

fn render_averages(a: &AverageCards) -> Html {
    html! {
        <div class="price-cards">
            <div class="price-card min">
                <div class="price-label">{ "Min Price" }</div>
                <div class="price-value">{ a.min.clone() }</div>
            </div>
            <div class="price-card modal">
                <div class="price-label">{ "Modal Price" }</div>
                <div class="price-value">{ a.modal.clone() }</div>
            </div>
            <div class="price-card max">
                <div class="price-label">{ "Max Price" }</div>
                <div class="price-value">{ a.max.clone() }</div>
            </div>
        </div>
    }
}

pub fn render_records(rows: &[RecordRow], columns: RecordColumns) -> Html {
    html! {
        <div class="table-container">
            <table class="market-table">
                <thead>
                    <tr>
                        { for columns.headers().into_iter().map(|h| html! { <th>{ h }</th> }) }
                    </tr>
                </thead>
                <tbody>
                    { for rows.iter().map(|r| html! {
                        <tr>
                            <td>{ r.date.clone() }</td>
                            if columns.district { <td>{ r.district.clone() }</td> }
                            <td>{ r.market.clone() }</td>
                            if columns.commodity { <td>{ r.commodity.clone() }</td> }
                            <td>{ r.min.clone() }</td>
                            <td class="modal-price">{ r.modal.clone() }</td>
                            <td>{ r.max.clone() }</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}

pub fn render_market(view: &MarketView, active_tab: usize, on_tab: Callback<usize>) -> Html {
    let tab_buttons = view.tabs.iter().enumerate().map(|(i, tab)| {
        let on_tab = on_tab.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_tab.emit(i));
        html! {
            <button class={classes!("tab-button", (i == active_tab).then_some("active"))} {onclick}>
                { tab.label.clone() }
            </button>
        }
    });

    let active = view.tabs.get(active_tab).map(|tab| {
        html! {
            <div class="tab-content active">
                { render_averages(&tab.averages) }
                if tab.rows.is_empty() {
                    <p class="no-data">{ "No market records for this date" }</p>
                } else {
                    { render_records(&tab.rows, RecordColumns::BY_DATE) }
                }
            </div>
        }
    });

    html! {
        <div class="market-results">
            <div class="latest-price-card">
                <h3>{ format!("💰 Latest Prices: {} in {}", view.commodity, view.district) }</h3>
                <div class="latest-date">{ view.latest_label.clone() }</div>
                { render_averages(&view.latest) }
            </div>

            <div class="date-tabs">{ for tab_buttons }</div>
            { active.unwrap_or_default() }

            <div class="comparison-card">
                <h3>{ "📊 Price Comparison" }</h3>
                <table class="market-table">
                    <thead>
                        <tr>
                            <th>{ "Date" }</th>
                            <th>{ "Min" }</th>
                            <th>{ "Modal" }</th>
                            <th>{ "Max" }</th>
                            <th>{ "Trend" }</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for view.comparison.iter().map(|row| html! {
                            <tr>
                                <td>{ row.date.clone() }</td>
                                <td>{ row.averages.min.clone() }</td>
                                <td>{ row.averages.modal.clone() }</td>
                                <td>{ row.averages.max.clone() }</td>
                                <td class={row.movement.css_class()}>{ row.movement.label() }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        </div>
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Weather

pub fn render_current_weather(c: &CurrentConditions) -> Html {
    html! {
        <div class="weather-current">
            <div class="weather-main">
                <span class="weather-icon">{ c.icon }</span>
                <div>
                    <h3>{ c.location.clone() }</h3>
                    <div class="weather-temp">{ c.temperature.clone() }</div>
                    <div class="weather-desc">{ c.description.clone() }</div>
                </div>
            </div>
            <div class="weather-details">
                <div>{ format!("🌡️ Feels like {}", c.feels_like) }</div>
                <div>{ format!("💧 Humidity {}", c.humidity) }</div>
                <div>{ format!("💨 Wind {}", c.wind) }</div>
                <div>{ format!("🔽 Pressure {}", c.pressure) }</div>
            </div>
        </div>
    }
}

pub fn render_weather_forecast(days: &[DayCard]) -> Html {
    html! {
        <div class="weather-forecast">
            <h3>{ "📅 Forecast" }</h3>
            <div class="forecast-days">
                { for days.iter().map(|d| html! {
                    <div class="day-card">
                        <div class="day-label">{ d.day.clone() }</div>
                        <div class="day-icon">{ d.icon }</div>
                        <div class="day-condition">{ d.condition.clone() }</div>
                        <div class="day-temps">
                            <span class="max">{ d.max_temp.clone() }</span>
                            { " / " }
                            <span class="min">{ d.min_temp.clone() }</span>
                        </div>
                        <div class="day-extra">{ d.humidity.clone() }</div>
                        <div class="day-extra">{ d.wind.clone() }</div>
                        <div class="day-extra">{ d.rain_chance.clone() }</div>
                    </div>
                }) }
            </div>
        </div>
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Videos

pub fn render_videos(cards: &[VideoCard]) -> Html {
    if cards.is_empty() {
        return html! { <p class="no-data">{ "No videos found for this crop" }</p> };
    }
    html! {
        <div class="video-grid">
            { for cards.iter().map(|v| html! {
                <div class="video-card">
                    <iframe
                        src={v.embed_url()}
                        title={v.title.clone()}
                        frameborder="0"
                        allowfullscreen=true
                        loading="lazy"
                    />
                    <div class="video-info">
                        <h4>{ v.title.clone() }</h4>
                        <p class="channel">{ v.channel.clone() }</p>
                    </div>
                </div>
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yew::virtual_dom::VNode;

    fn card(id: &str) -> VideoCard {
        VideoCard {
            video_id: id.to_string(),
            title: format!("Growing onions {}", id),
            channel: "Krishi Darshan".to_string(),
            thumbnail: None,
        }
    }

    #[test]
    fn video_grid_embeds_each_card() {
        let html = render_videos(&[card("a1"), card("b2")]);
        let VNode::VTag(grid) = html else {
            panic!("expected the grid element");
        };
        assert_eq!(grid.tag(), "div");
    }

    #[test]
    fn empty_video_list_shows_placeholder() {
        let VNode::VTag(tag) = render_videos(&[]) else {
            panic!("expected a paragraph");
        };
        assert_eq!(tag.tag(), "p");
    }
}
