use log::warn;

use crate::error::ApiError;

/// Identifies one armed debounce window.
pub type Ticket = u64;

/// What the result dropdown shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultList {
	pub visible: bool,
	pub items: Vec<String>,
}

/// How the component must treat its debounce timer after an input change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
	/// Input too short: drop any pending timer, nothing is queried.
	Cancelled,
	/// (Re)start the timer for this ticket.
	Armed(Ticket),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
	pub seq: u64,
	pub query: String,
}

/// Debounced search state for one input box.
///
/// `Idle -> Debouncing -> Querying -> Showing | Idle`. Requests are numbered
/// in issue order and only the newest one may update the list; selecting a
/// result or shortening the input below the minimum also retires every
/// request already in flight.
#[derive(Debug)]
pub struct SearchController {
	min_chars: usize,
	input: String,
	armed: Option<(Ticket, String)>,
	last_ticket: Ticket,
	issued: u64,
	retired: u64,
	list: ResultList,
}

impl SearchController {
	pub fn new(min_chars: usize) -> Self {
		Self {
			min_chars,
			input: String::new(),
			armed: None,
			last_ticket: 0,
			issued: 0,
			retired: 0,
			list: ResultList::default(),
		}
	}

	pub fn list(&self) -> &ResultList {
		&self.list
	}

	/// Text the input box should show.
	pub fn input(&self) -> &str {
		&self.input
	}

	pub fn on_input(&mut self, raw: &str) -> InputOutcome {
		self.input = raw.to_owned();
		let query = raw.trim();
		self.armed = None;
		if query.chars().count() < self.min_chars {
			self.hide();
			self.retired = self.issued;
			return InputOutcome::Cancelled;
		}
		self.last_ticket += 1;
		self.armed = Some((self.last_ticket, query.to_owned()));
		InputOutcome::Armed(self.last_ticket)
	}

	/// The debounce window for `ticket` elapsed. Superseded tickets yield
	/// nothing.
	pub fn on_timer(&mut self, ticket: Ticket) -> Option<SearchRequest> {
		match self.armed.take() {
			Some((armed, query)) if armed == ticket => {
				self.issued += 1;
				Some(SearchRequest {
					seq: self.issued,
					query,
				})
			}
			other => {
				self.armed = other;
				None
			}
		}
	}

	/// Apply a response. Returns whether the list changed hands.
	pub fn on_response(&mut self, seq: u64, result: Result<Vec<String>, ApiError>) -> bool {
		if seq <= self.retired || seq < self.issued {
			return false;
		}
		match result {
			Ok(items) if !items.is_empty() => {
				self.list = ResultList {
					visible: true,
					items,
				};
			}
			Ok(_) => self.hide(),
			Err(e) => {
				warn!("Search failed: {}", e);
				self.hide();
			}
		}
		true
	}

	/// A result was picked. Clears the input and returns the company to open.
	pub fn on_select(&mut self, name: String) -> String {
		self.input.clear();
		self.armed = None;
		self.retired = self.issued;
		self.hide();
		name
	}

	pub fn on_outside_click(&mut self) {
		self.list.visible = false;
	}

	fn hide(&mut self) {
		self.list.visible = false;
		self.list.items.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn names(items: &[&str]) -> Vec<String> {
		items.iter().map(|s| s.to_string()).collect()
	}

	fn armed(outcome: InputOutcome) -> Ticket {
		match outcome {
			InputOutcome::Armed(ticket) => ticket,
			InputOutcome::Cancelled => panic!("expected a debounce ticket"),
		}
	}

	fn query(search: &mut SearchController, input: &str) -> SearchRequest {
		let ticket = armed(search.on_input(input));
		search.on_timer(ticket).unwrap()
	}

	#[test]
	fn single_character_never_queries() {
		let mut search = SearchController::new(2);
		assert_eq!(search.on_input("a"), InputOutcome::Cancelled);
		assert_eq!(search.on_input("  b "), InputOutcome::Cancelled);
		assert_eq!(search.on_timer(1), None);
	}

	#[test]
	fn quiet_window_issues_one_trimmed_request() {
		let mut search = SearchController::new(2);
		let ticket = armed(search.on_input(" ab "));
		let request = search.on_timer(ticket).unwrap();
		assert_eq!(request.query, "ab");
		assert_eq!(search.on_timer(ticket), None);
	}

	#[test]
	fn rapid_typing_queries_only_the_last_input() {
		let mut search = SearchController::new(2);
		assert_eq!(search.on_input("a"), InputOutcome::Cancelled);
		let first = armed(search.on_input("ab"));
		let last = armed(search.on_input("abc"));
		assert_eq!(search.on_timer(first), None);
		let request = search.on_timer(last).unwrap();
		assert_eq!(request.query, "abc");
		assert_eq!(request.seq, 1);
	}

	#[test]
	fn short_input_cancels_pending_query_and_hides_list() {
		let mut search = SearchController::new(2);
		let ticket = armed(search.on_input("acme"));
		let request = search.on_timer(ticket).unwrap();
		search.on_response(request.seq, Ok(names(&["Acme"])));
		assert!(search.list().visible);

		let pending = armed(search.on_input("acm"));
		assert_eq!(search.on_input("a"), InputOutcome::Cancelled);
		assert!(!search.list().visible);
		assert_eq!(search.on_timer(pending), None);
	}

	#[test]
	fn results_show_in_server_order() {
		let mut search = SearchController::new(2);
		let request = query(&mut search, "co");
		assert!(search.on_response(request.seq, Ok(names(&["Acme", "Globex"]))));
		assert_eq!(
			search.list(),
			&ResultList {
				visible: true,
				items: names(&["Acme", "Globex"]),
			}
		);
	}

	#[test]
	fn empty_results_hide_the_list() {
		let mut search = SearchController::new(2);
		let request = query(&mut search, "zz");
		search.on_response(request.seq, Ok(vec![]));
		assert!(!search.list().visible);
		assert!(search.list().items.is_empty());
	}

	#[test]
	fn failed_search_hides_the_list() {
		let mut search = SearchController::new(2);
		let first = query(&mut search, "ac");
		search.on_response(first.seq, Ok(names(&["Acme"])));
		let second = query(&mut search, "acx");
		let error = ApiError::Status {
			url: "/api/search".into(),
			status: 500,
		};
		assert!(search.on_response(second.seq, Err(error)));
		assert!(!search.list().visible);
	}

	#[test]
	fn older_response_is_discarded() {
		let mut search = SearchController::new(2);
		let old = query(&mut search, "ac");
		let new = query(&mut search, "acme");
		assert!(search.on_response(new.seq, Ok(names(&["Acme"]))));
		assert!(!search.on_response(old.seq, Ok(names(&["Acme", "Acorn"]))));
		assert_eq!(search.list().items, names(&["Acme"]));
	}

	#[test]
	fn selecting_hides_list_and_retires_in_flight_requests() {
		let mut search = SearchController::new(2);
		let shown = query(&mut search, "ac");
		search.on_response(shown.seq, Ok(names(&["Acme", "Acorn"])));
		let in_flight = query(&mut search, "acm");

		assert_eq!(search.on_select("Acorn".into()), "Acorn");
		assert_eq!(search.input(), "");
		assert!(!search.list().visible);
		assert!(!search.on_response(in_flight.seq, Ok(names(&["Acme"]))));
		assert!(!search.list().visible);
	}

	#[test]
	fn input_text_follows_typing() {
		let mut search = SearchController::new(2);
		search.on_input(" acm");
		assert_eq!(search.input(), " acm");
		search.on_input("a");
		assert_eq!(search.input(), "a");
	}

	#[test]
	fn outside_click_hides_without_forgetting_results() {
		let mut search = SearchController::new(2);
		let request = query(&mut search, "ac");
		search.on_response(request.seq, Ok(names(&["Acme"])));
		search.on_outside_click();
		assert!(!search.list().visible);
		assert_eq!(search.list().items, names(&["Acme"]));
	}
}
