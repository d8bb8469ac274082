mod test_unknown_addressee_dropped;
